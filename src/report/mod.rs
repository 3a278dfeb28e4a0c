mod collector;

pub use collector::collect_report_data;
