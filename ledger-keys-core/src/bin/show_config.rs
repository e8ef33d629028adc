use ledger_keys_core::{init, KeyConfig};

fn main() {
    let config = match init() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    print_config(&config);
}

fn print_config(config: &KeyConfig) {
    let password = config.password_config();

    println!("{} {}", ledger_keys_core::NAME, ledger_keys_core::VERSION);
    println!("{}\n", ledger_keys_core::DESCRIPTION);
    println!("  Backend: {:?}", config.backend);
    println!("  Log level: {}", config.log_level);
    println!("  Default mnemonic length: {} words", config.default_mnemonic_words);
    println!("  Keystore KDF: pbkdf2 ({})", password.algorithm.keystore_name());
    println!("  Keystore iterations: {}", password.iterations);
    println!("  Keystore salt length: {} bytes", password.salt_length);
}
