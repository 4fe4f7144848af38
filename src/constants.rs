pub mod session {
    /// Holds the serialized `SessionUser` once logged in.
    pub const USER_KEY: &str = "user";

    /// Pending flash messages, drained by the next rendered page.
    pub const FLASH_KEY: &str = "_flashes";
}

pub mod routes {
    pub const LOGIN: &str = "/login";

    pub const REGISTER: &str = "/register";

    pub const DASHBOARD: &str = "/dashboard";
}

pub mod messages {
    pub const REGISTERED: &str = "Registration successful! Please log in.";

    pub const LOGGED_IN: &str = "Login successful!";

    pub const LOGGED_OUT: &str = "Logged out successfully!";

    pub const INVALID_CREDENTIALS: &str = "Invalid username or password!";

    pub const USERNAME_TAKEN: &str = "Username already exists!";

    pub const STUDENT_ADDED: &str = "Student added successfully!";

    pub const STUDENT_UPDATED: &str = "Student updated successfully!";

    pub const STUDENT_DELETED: &str = "Student deleted successfully!";

    pub const MATRIC_TAKEN: &str = "Matric No already exists!";
}
