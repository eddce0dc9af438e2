pub use super::bible_readings::Entity as BibleReadings;
pub use super::users::Entity as Users;
