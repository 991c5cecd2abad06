//! User registration command

use crate::error::LedgerResult;
use crate::services::user::DEFAULT_ACCOUNT_NAME;
use crate::services::UserService;
use crate::storage::Backend;

/// Handle `ledger register`
pub fn handle_register_command<B: Backend>(
    backend: &mut B,
    name: &str,
    email: &str,
    password: &str,
) -> LedgerResult<()> {
    let user = UserService::new(backend).register(name, email, password)?;

    println!("Registered {} <{}>", user.name, user.email);
    println!("  Starting account: {}", DEFAULT_ACCOUNT_NAME);
    println!("  Sign in with --user {}", user.email);
    Ok(())
}
