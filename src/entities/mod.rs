pub mod prelude;

pub mod bible_readings;
pub mod users;
