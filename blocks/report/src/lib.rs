pub mod error;
pub mod layout;
pub mod render;

pub use error::ReportError;
pub use render::{
    header_lines, plan_report, render_project_report, report_file_name, save_project_report,
    HeaderLine, ReportPlan,
};
