pub mod reference;
pub mod track;
