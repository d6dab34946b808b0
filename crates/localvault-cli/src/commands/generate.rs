use localvault_core::crypto::generate_password;

use crate::cli::GenerateArgs;

pub fn handle_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let password = generate_password(args.length)?;
    println!("{}", password);
    Ok(())
}
