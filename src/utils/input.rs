use rpassword::read_password;
use std::io;
use std::io::Write;

/// Prompts on stdout and reads one line from stdin without echo.
pub fn input_password_trim(prompt: &str) -> io::Result<String> {
    println!("{}", prompt);
    io::stdout().flush()?;
    Ok(read_password()?.trim().to_string())
}
