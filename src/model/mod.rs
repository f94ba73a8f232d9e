pub mod coverage;
pub mod records;
pub mod track;
