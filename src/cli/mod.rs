pub mod orchestration;

pub use orchestration::{
    run_release_pipeline, run_release_pipeline_with, FileGroupPlan, PipelineArgs,
    ProductFilePlan, ReleasePlan, ReleaseSummary,
};
