/// Name of the HTTP-only session cookie.
pub const SESSION_COOKIE: &str = "auth-token";

pub mod session {

    /// Cookie and token lifetime for a standard login: one day.
    pub const DEFAULT_MAX_AGE_SECS: i64 = 60 * 60 * 24;

    /// Cookie and token lifetime with "remember me": thirty days.
    pub const REMEMBER_ME_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;
}

pub mod gesture {

    /// Leftward travel that arms the edit action on release.
    pub const EDIT_THRESHOLD_PX: f64 = 80.0;

    /// Leftward travel that arms the delete action on release.
    pub const DELETE_THRESHOLD_PX: f64 = 150.0;

    /// Horizontal travel that pages the calendar by one month.
    pub const PAGE_THRESHOLD_PX: f64 = 100.0;

    /// Travel before a drag commits to horizontal or vertical.
    pub const DIRECTION_LOCK_PX: f64 = 5.0;
}
