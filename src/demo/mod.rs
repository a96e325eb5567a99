//! 首屏脚本化演示：步骤表（script）与一次性执行器（runner）

pub mod runner;
pub mod script;

pub use runner::{DemoOutcome, DemoRunner};
pub use script::{
    typewriter_duration, DemoAction, DemoScript, DemoStep, DEMO_TASK, DEMO_USER_MESSAGE,
    DEMO_VIDEO_URL,
};
