// Page objects for the application under test

pub mod login;

pub use login::LoginPage;
