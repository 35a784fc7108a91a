//! Test fixtures - reusable property files.

/// Nothing configured at all
pub const EMPTY: &str = "settings: {}\nstages: {}\n";

/// A project with every pipeline step wired to logging scripts or stubs
pub fn project(origin: &str) -> String {
    format!(
        r#"
settings:
  lint:
    scripts:
      - echo lint >> "$PAP_TOOL_LOG"
  test:
    unit:
      scripts:
        - echo phpunit >> "$PAP_TOOL_LOG"
    integration:
      scripts:
        - echo "behat $PAP_STAGE $BASEURL" >> "$PAP_TOOL_LOG"
  assets:
    scripts:
      - npm run build
  composer:
    phar: composer
  prepare-sync-paths:
    - source: web/
      target: build/web/
  sync-paths:
    - source: build/web/
      target: web/
stages:
  local:
    working-directory: /tmp/pap-local/
    origin: {origin}
  live:
    host: example.com
    user: deploy
    port: 2222
    working-directory: /var/www/live/
    origin: {origin}
    lock-branches: [main]
"#
    )
}

/// Lock line for `stage`/`branch` deployed `age` seconds ago
pub fn lock_line(stage: &str, branch: &str, age: i64) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    format!("{},{},{}\n", stage, branch, now - age)
}
