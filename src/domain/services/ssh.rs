//! SSH command lines

use crate::domain::ports::{CommandSpec, RemoteTarget};

/// Quote `value` for a POSIX shell
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// `ssh [-p N] user@host 'cd <wd> && [K=V ...] <command>'`
pub fn remote_command(remote: &RemoteTarget, spec: &CommandSpec) -> CommandSpec {
    let mut line = String::new();
    if !remote.working_dir.is_empty() {
        line.push_str(&format!("cd {} && ", shell_quote(&remote.working_dir)));
    }
    for (key, value) in spec.env_vars() {
        line.push_str(&format!("{}={} ", key, shell_quote(value)));
    }
    line.push_str(&spec.display_line());

    let mut ssh = CommandSpec::new("ssh");
    if let Some(port) = remote.port {
        ssh = ssh.arg("-p").arg(port.to_string());
    }
    ssh.arg(remote.destination()).arg(line)
}

/// Login shell on the stage, started in its working directory
pub fn interactive_shell(remote: &RemoteTarget) -> CommandSpec {
    let mut ssh = CommandSpec::new("ssh").arg("-t").arg(remote.destination());
    if let Some(port) = remote.port {
        ssh = ssh.arg("-p").arg(port.to_string());
    }
    let line = if remote.working_dir.is_empty() {
        "exec bash -l".to_string()
    } else {
        format!("cd {} && exec bash -l", shell_quote(&remote.working_dir))
    };
    ssh.arg(line).interactive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live() -> RemoteTarget {
        RemoteTarget {
            host: "example.com".to_string(),
            user: "deploy".to_string(),
            port: Some(2222),
            working_dir: "/var/www/live/".to_string(),
        }
    }

    #[test]
    fn quoting() {
        assert_eq!(shell_quote("/var/www/"), "/var/www/");
        assert_eq!(shell_quote("with space"), "'with space'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn remote_command_changes_directory_first() {
        let spec = CommandSpec::shell("composer install --no-dev");
        let ssh = remote_command(&live(), &spec);
        assert_eq!(ssh.program(), "ssh");
        assert_eq!(
            ssh.arguments(),
            &[
                "-p",
                "2222",
                "deploy@example.com",
                "cd /var/www/live/ && composer install --no-dev",
            ]
        );
    }

    #[test]
    fn remote_command_forwards_environment() {
        let spec = CommandSpec::new("vendor/bin/codecept").arg("run").env("BASEURL", "https://x/");
        let mut target = live();
        target.port = None;
        let ssh = remote_command(&target, &spec);
        assert_eq!(
            ssh.arguments().last().map(String::as_str),
            Some("cd /var/www/live/ && BASEURL=https://x/ vendor/bin/codecept run")
        );
    }

    #[test]
    fn interactive_shell_is_a_login_shell() {
        let ssh = interactive_shell(&live());
        assert!(ssh.is_interactive());
        assert_eq!(
            ssh.arguments(),
            &["-t", "deploy@example.com", "-p", "2222", "cd /var/www/live/ && exec bash -l"]
        );
    }
}
