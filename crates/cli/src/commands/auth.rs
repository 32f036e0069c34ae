//! Authentication and profile commands.

use clap::{Args, Subcommand};

use kiosk_core::Email;
use kiosk_storefront::AppState;
use kiosk_storefront::models::{Address, GeoLocation, Identity, IdentityDraft, PersonName, ProfileUpdate};

/// CLI-level auth errors: session failures plus input validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthCommandError {
    #[error(transparent)]
    Session(#[from] kiosk_storefront::stores::SessionError),
    #[error("invalid email: {0}")]
    Email(#[from] kiosk_core::EmailError),
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in as a known user
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out of the current session
    Logout,
    /// Register a new account (and log in)
    Register(RegisterArgs),
    /// Show the current session
    Whoami,
    /// Update profile fields of the logged-in user
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(short, long)]
    pub password: String,

    #[arg(short, long)]
    pub email: String,

    #[arg(long)]
    pub firstname: String,

    #[arg(long)]
    pub lastname: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub street: String,

    #[arg(long, default_value_t = 0)]
    pub number: u32,

    #[arg(long)]
    pub zipcode: String,

    #[arg(long)]
    pub phone: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New first name (pairs with --lastname; the name group is replaced whole)
    #[arg(long, requires = "lastname")]
    pub firstname: Option<String>,

    /// New last name
    #[arg(long, requires = "firstname")]
    pub lastname: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// New password
    #[arg(long)]
    pub password: Option<String>,
}

/// Run an `auth` subcommand.
pub async fn run(state: &mut AppState, action: AuthAction) -> Result<(), AuthCommandError> {
    match action {
        AuthAction::Login { username, password } => {
            let user = state.login(&username, &password).await?;
            println!("logged in as {} ({})", user.username, user.email);
            report_cart(state);
        }
        AuthAction::Logout => {
            state.logout();
            println!("logged out");
            report_cart(state);
        }
        AuthAction::Register(args) => {
            let draft = draft_from(args)?;
            let user = state.register(draft).await?;
            println!("registered {} with id {}", user.username, user.id);
            report_cart(state);
        }
        AuthAction::Whoami => match state.session().current() {
            Some(user) => print_profile(user),
            None => println!("not logged in"),
        },
        AuthAction::Update(args) => {
            let update = update_from(args)?;
            let user = state.update_profile(update).await?;
            println!("profile updated");
            print_profile(&user);
        }
    }
    Ok(())
}

fn draft_from(args: RegisterArgs) -> Result<IdentityDraft, AuthCommandError> {
    Ok(IdentityDraft {
        username: args.username,
        password: args.password,
        email: Email::parse(&args.email)?,
        name: PersonName {
            firstname: args.firstname,
            lastname: args.lastname,
        },
        address: Address {
            city: args.city,
            street: args.street,
            number: args.number,
            zipcode: args.zipcode,
            geolocation: GeoLocation {
                lat: "0".to_string(),
                long: "0".to_string(),
            },
        },
        phone: args.phone,
    })
}

fn update_from(args: UpdateArgs) -> Result<ProfileUpdate, AuthCommandError> {
    let email = args.email.as_deref().map(Email::parse).transpose()?;
    // clap's `requires` guarantees both halves arrive together.
    let name = args.firstname.zip(args.lastname).map(|(firstname, lastname)| PersonName {
        firstname,
        lastname,
    });

    Ok(ProfileUpdate {
        username: None,
        password: args.password,
        email,
        name,
        address: None,
        phone: args.phone,
    })
}

fn print_profile(user: &Identity) {
    println!("{} (id {})", user.username, user.id);
    println!("  name:  {} {}", user.name.firstname, user.name.lastname);
    println!("  email: {}", user.email);
    println!("  phone: {}", user.phone);
    println!(
        "  addr:  {} {}, {}, {}",
        user.address.number, user.address.street, user.address.city, user.address.zipcode
    );
}

fn report_cart(state: &AppState) {
    let cart = state.cart();
    println!(
        "active cart: {} ({} items, total {})",
        cart.owner(),
        cart.item_count(),
        cart.total()
    );
}
