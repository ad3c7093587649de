use crate::demo::{run_demo, run_quote, run_rooms, DemoArgs, QuoteArgs, RoomsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hotel_booking::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hotel Booking",
    about = "Serve and demonstrate the hotel room booking flow from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List catalog rooms that fit a party, with the price of the stay
    Rooms(RoomsArgs),
    /// Print the price breakdown for one room and date range
    Quote(QuoteArgs),
    /// Walk through the booking wizard end to end and print every screen
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rooms(args) => run_rooms(args),
        Command::Quote(args) => run_quote(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["hotel-booking-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn quote_requires_a_room() {
        assert!(Cli::try_parse_from(["hotel-booking-api", "quote"]).is_err());

        let cli = Cli::try_parse_from([
            "hotel-booking-api",
            "quote",
            "--room",
            "4",
            "--check-in",
            "2024-01-01",
            "--check-out",
            "2024-01-04",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Quote(args)) => {
                assert_eq!(args.room, 4);
                assert_eq!(
                    args.check_out.map(|date| date.to_string()).as_deref(),
                    Some("2024-01-04")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_host_and_port_overrides() {
        let cli = Cli::try_parse_from(["hotel-booking-api", "serve", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
