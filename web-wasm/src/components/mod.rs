pub mod header;
pub mod stat_cards;
pub mod monthly_chart;
pub mod job_form;
pub mod job_list;
