mod layout;
pub use layout::{AppLayout, NotFound};

mod login;
pub use login::LoginPage;

mod signup;
pub use signup::SignupPage;

mod home;
pub use home::HomePage;

mod about;
pub use about::{AboutUsPage, ContactUs};

mod timetable;
pub use timetable::TimetablePage;

mod attendance;
pub use attendance::AttendancePage;

mod exams;
pub use exams::ExamsQuizPage;

mod profile;
pub use profile::ProfilePage;
