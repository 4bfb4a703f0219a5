/// Maximum upload request size in bytes (10MB)
/// Covers multipart overhead plus a full-resolution powder bed photo
pub const MAX_UPLOAD_SIZE_BYTES: usize = 10_485_760;

/// Placeholder prediction score until a real comparison model is wired in
pub const PLACEHOLDER_PREDICTED_VALUE: f64 = 0.0;

/// Name of the signed session cookie
pub const SESSION_COOKIE: &str = "session";

/// Name of the one-shot flash message cookie
pub const FLASH_COOKIE: &str = "flash";

// =============================================================================
// Flash Messages
// =============================================================================

/// Error message when the multipart body has no file part
pub const MSG_NO_FILE_PART: &str = "No file part";

/// Error message when the file part has an empty filename
pub const MSG_NO_SELECTED_FILE: &str = "No selected file";

/// Error message when batch number or powder type is missing on initial upload
pub const MSG_BATCH_AND_POWDER_REQUIRED: &str = "Batch number and powder type are required.";

/// Error message when cycle number is missing on comparison upload
pub const MSG_CYCLE_REQUIRED: &str = "Cycle number is required.";

/// Error message when username or password is missing
pub const MSG_CREDENTIALS_REQUIRED: &str = "Username and password are required.";

/// Error message for a duplicate username at registration
pub const MSG_USERNAME_TAKEN: &str = "Username already exists. Please choose a different one.";

/// Generic login failure message (never distinguishes unknown user from bad password)
pub const MSG_BAD_CREDENTIALS: &str =
    "Incorrect username or password. Please try again or register.";

/// Error message when an operation needs a logged-in session
pub const MSG_LOGIN_REQUIRED: &str = "Please log in first.";

/// Error message when the referenced initial image does not exist
pub const MSG_INITIAL_NOT_FOUND: &str = "Initial image not found.";

/// Success message after registration
pub const MSG_REGISTERED: &str = "Registration successful! Please log in.";

/// Success message after login
pub const MSG_LOGGED_IN: &str = "Login successful!";

/// Info message after logout
pub const MSG_LOGGED_OUT: &str = "You have been logged out.";

/// Success message after the initial image upload
pub const MSG_INITIAL_UPLOADED: &str = "Initial image uploaded successfully!";

/// Success message after a comparison image upload
pub const MSG_COMPARISON_UPLOADED: &str = "New image uploaded and compared successfully!";
