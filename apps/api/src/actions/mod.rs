// Side-effect actions triggered from the dashboard: application emails and
// pushing the application log to GitHub. Credentials arrive with each request.

pub mod email;
pub mod github;
pub mod handlers;
