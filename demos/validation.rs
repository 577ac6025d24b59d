//! Validation Example
//!
//! Demonstrates collecting every failure of a form instead of stopping at the
//! first one, while keeping a log of which fields were checked.
//!
//! Run with: cargo run --example validation

use nomad::{Either, NomadEither};

#[derive(Debug, Clone, PartialEq)]
enum Audit {
    Checked(&'static str),
}

#[derive(Debug)]
struct SignUp {
    username: String,
    email: String,
    age: u8,
}

type Field<T> = NomadEither<Audit, Vec<String>, T>;

// ============================================================================
// Field validators
// ============================================================================

fn username(raw: &str) -> Field<String> {
    let checked = NomadEither::right(raw.to_string());
    let checked = if raw.len() < 3 {
        NomadEither::left(vec!["username must have at least 3 characters".to_string()])
    } else {
        checked
    };
    checked.effect(Audit::Checked("username"))
}

fn email(raw: &str) -> Field<String> {
    let checked = if raw.contains('@') {
        NomadEither::right(raw.to_string())
    } else {
        NomadEither::left(vec![format!("{:?} is not an email address", raw)])
    };
    checked.effect(Audit::Checked("email"))
}

fn age(raw: &str) -> Field<u8> {
    NomadEither::from_result(raw.parse::<u8>().map_err(|e| vec![format!("age: {}", e)]))
        .effect(Audit::Checked("age"))
}

// ============================================================================
// Accumulating every error
// ============================================================================

fn sign_up(name: &str, mail: &str, years: &str) -> Field<SignUp> {
    NomadEither::right(|username: String| {
        move |email: String| move |age: u8| SignUp { username, email, age }
    })
        .ap_validation(username(name))
        .ap_validation(email(mail))
        .ap_validation(age(years))
}

fn report(label: &str, result: Field<SignUp>) {
    let (log, outcome) = result.into_parts();
    println!("{}", label);
    println!("  checked: {:?}", log);
    match outcome {
        Either::Right(user) => println!("  accepted: {:?}", user),
        Either::Left(errors) => {
            for e in errors {
                println!("  rejected: {}", e);
            }
        }
    }
}

fn main() {
    println!("=== Validation Example ===\n");

    report("valid form", sign_up("ada", "ada@example.com", "36"));
    report("three problems", sign_up("x", "not-an-email", "two hundred"));

    // Plain `ap` stops at the first failure on the function side.
    let first_only = NomadEither::<Audit, Vec<String>, _>::right(|u: String| u.len())
        .ap(username("x"));
    println!("\nplain ap: {:?}", first_only.into_either());
}
