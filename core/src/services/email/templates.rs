//! HTML bodies for the transactional emails

/// Subject and body for the account verification email
pub fn verification_email(link: &str) -> (String, String) {
    let subject = "Email Verification".to_string();
    let body = format!(
        "<h1>Verify your Email</h1>\
         <p>Please click this <a href=\"{link}\">link</a> to verify your email address.</p>\
         <p>If you did not create an account, you can ignore this message.</p>"
    );
    (subject, body)
}

/// Subject and body for the password reset email
pub fn password_reset_email(link: &str) -> (String, String) {
    let subject = "Reset your password".to_string();
    let body = format!(
        "<h1>Reset your password</h1>\
         <p>Please click this <a href=\"{link}\">link</a> to choose a new password.</p>\
         <p>If you did not request a reset, you can ignore this message.</p>"
    );
    (subject, body)
}
