//! `test:smoke`: one GET against the stage origin

use crate::application::context::TaskContext;
use crate::domain::value_objects::StepOutcome;
use crate::error::{PapError, PapResult};

pub const SMOKE_FAILED: &str = "Smoke test failed";

pub fn smoke(ctx: &TaskContext, stage: &str) -> PapResult<StepOutcome> {
    let Some(origin) = ctx.config().stage(stage).and_then(|s| s.origin()) else {
        return ctx.skip("Stage origin not configured - Nothing to do");
    };

    match ctx.ports().http.get(origin) {
        Ok(status) => {
            tracing::debug!(%origin, status, "smoke test response");
            ctx.success(format!("Smoke test successful for {}", origin));
            Ok(StepOutcome::Success)
        }
        Err(err) => Err(PapError::Connectivity {
            url: origin.to_string(),
            message: err.to_string(),
        }
        .because(SMOKE_FAILED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{rig, FakeHttp, PROJECT};

    #[test]
    fn responding_origin_passes() {
        let rig = rig(PROJECT).build();
        assert_eq!(smoke(&rig.ctx, "live").unwrap(), StepOutcome::Success);
        assert_eq!(rig.http.requests(), vec!["https://example.com".to_string()]);
        assert!(rig.sink.said("Smoke test successful for https://example.com"));
    }

    #[test]
    fn error_status_fails() {
        let rig = rig(PROJECT).http(FakeHttp::status(503)).build();
        assert_eq!(smoke(&rig.ctx, "live").unwrap_err().to_string(), SMOKE_FAILED);
    }

    #[test]
    fn unreachable_origin_fails() {
        let rig = rig(PROJECT).http(FakeHttp::unreachable()).build();
        let err = smoke(&rig.ctx, "live").unwrap_err();
        assert!(matches!(err, PapError::Task { ref source, .. }
            if matches!(**source, PapError::Connectivity { .. })));
    }

    #[test]
    fn missing_origin_or_stage_is_skipped() {
        let rig = rig("stages:\n  faulty:\n    host: example.com\n    origin: ''\n").build();
        for stage in ["faulty", "not-existing-stage"] {
            assert_eq!(
                smoke(&rig.ctx, stage).unwrap(),
                StepOutcome::skipped("Stage origin not configured - Nothing to do")
            );
        }
        assert!(rig.http.requests().is_empty());
    }
}
