pub mod catalog;
pub mod inspect;
pub mod run;
pub mod version;
