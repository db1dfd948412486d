// Encrypts two random exponents and checks the homomorphic operations by
// printing each expected element of the message subgroup next to the
// decrypted one.
//
// Run with `RUST_LOG=debug` to see the parameter generation.

use clhe::cl::{ClParametersBuilder, KeyPair, Plaintext};
use clhe_traits::{LheDecrypter, LheEncrypter};
use rand::thread_rng;
use std::{env, error::Error, process::exit};
use tracing_subscriber::EnvFilter;

fn print_notice_and_exit(error: Option<String>) {
    println!("Usage: cl_demo [-h] [--help] [--factor_size=<value>]");
    println!("  --factor_size   bit size of each prime factor of the group order (default 128)");
    if let Some(error) = error {
        println!("\nError: {}", error);
    }
    exit(0);
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.contains(&"-h".to_string()) || args.contains(&"--help".to_string()) {
        print_notice_and_exit(None)
    }

    let mut factor_size = 128;
    for arg in &args {
        if arg.starts_with("--factor_size") {
            let a: Vec<&str> = arg.rsplit('=').collect();
            if a.len() != 2 || a[0].parse::<usize>().is_err() {
                print_notice_and_exit(Some("Invalid `--factor_size` argument".to_string()))
            } else {
                factor_size = a[0].parse::<usize>()?
            }
        } else {
            print_notice_and_exit(Some(format!("Unrecognized argument: {}", arg)))
        }
    }

    let mut rng = thread_rng();
    let parameters = ClParametersBuilder::new()
        .set_factor_size(factor_size)
        .build_arc(&mut rng)?;
    println!("{:?}", parameters);

    let key_pair = KeyPair::generate(&parameters, &mut rng)?;
    let (sk, pk) = (key_pair.sk(), key_pair.pk());

    let a = Plaintext::random(&parameters, &mut rng)?;
    let b = Plaintext::random(&parameters, &mut rng)?;
    let enc_a = pk.try_encrypt(&a, &mut rng)?;
    let enc_b = pk.try_encrypt(&b, &mut rng)?;

    println!("{}", a.encode());
    println!("{}", sk.try_decrypt(&enc_a)?);
    println!("{}", b.encode());
    println!("{}", sk.try_decrypt(&enc_b)?);

    let scaled = &enc_b * &a;
    println!("{}", (&a * &b).encode());
    println!("{}", sk.try_decrypt(&scaled)?);

    let sum = &enc_a + &enc_b;
    println!("{}", (&a + &b).encode());
    println!("{}", sk.try_decrypt(&sum)?);

    Ok(())
}
