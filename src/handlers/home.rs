/// Text served at `/`, whatever the session holds.
pub const GREETING: &str = "Hey Ninja ! Go to /user/signin for the login page.";

pub async fn index() -> &'static str {
    GREETING
}
