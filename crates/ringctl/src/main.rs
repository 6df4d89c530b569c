use clap::{Args, Parser, Subcommand};
use ringctl::SOCKET_PATH;
use ringctl::protocol::Command;
use ringmenu::{ContainerId, Point, Size, resolve_sector};
use std::f64::consts::FRAC_PI_2;
use std::io::{BufRead, BufReader, Write};
use std::num::NonZeroUsize;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ringctl", version, about, long_about = None)]
struct Cli {
    /// Socket of the running ringmenud
    #[arg(short, long, default_value = SOCKET_PATH)]
    socket: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Expand or collapse a menu without a pointer.
    Toggle { menu: String },
    /// Click a menu, optionally at page coordinates.
    Click(PointerArgs),
    /// Tell a menu the pointer entered its region.
    Enter { menu: String },
    /// Tell a menu the pointer left its region.
    Leave { menu: String },
    /// Move the pointer over a menu.
    Move(PointerArgs),
    /// Print the state of a menu as the daemon sees it.
    Status { menu: String },
    /// Reload the daemon configuration.
    Reload,
    /// Resolve the sector a pointer falls into, without talking to the daemon.
    Sector(SectorArgs),
}

#[derive(Args, Debug, Clone)]
struct PointerArgs {
    menu: String,
    #[arg(requires = "y", allow_negative_numbers = true)]
    x: Option<f64>,
    #[arg(allow_negative_numbers = true)]
    y: Option<f64>,
}

impl PointerArgs {
    fn into_parts(self) -> (ContainerId, Option<Point>) {
        let pointer = self.x.zip(self.y).map(|(x, y)| Point::new(x, y));
        (ContainerId::new(self.menu), pointer)
    }
}

#[derive(Args, Debug, Clone)]
struct SectorArgs {
    /// Number of items on the ring
    #[arg(short = 'n', long)]
    items: NonZeroUsize,
    /// Angle of item 0 in radians
    #[arg(long, default_value_t = FRAC_PI_2, allow_negative_numbers = true)]
    offset: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    left: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    top: f64,
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    #[arg(allow_negative_numbers = true)]
    x: f64,
    #[arg(allow_negative_numbers = true)]
    y: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Sector(args) => {
            print_sector(&args);
            return Ok(());
        }
        Commands::Toggle { menu } => Command::Toggle(ContainerId::new(menu)),
        Commands::Click(args) => {
            let (menu, pointer) = args.into_parts();
            Command::Click(menu, pointer)
        }
        Commands::Enter { menu } => Command::Enter(ContainerId::new(menu)),
        Commands::Leave { menu } => Command::Leave(ContainerId::new(menu)),
        Commands::Move(args) => {
            let (menu, pointer) = args.into_parts();
            Command::Move(menu, pointer)
        }
        Commands::Status { menu } => Command::Status(ContainerId::new(menu)),
        Commands::Reload => Command::Reload,
    };

    let stream = send_command(&cli.socket, &command)?;
    if command.expects_reply() {
        print_reply(stream)?;
    }
    Ok(())
}

fn print_sector(args: &SectorArgs) {
    let sector = resolve_sector(
        Point::new(args.x, args.y),
        Point::new(args.left, args.top),
        Size::new(args.width, args.height),
        args.items,
        args.offset,
    );
    log::debug!("({}, {}) -> sector {} of {}", args.x, args.y, sector, args.items);
    println!("{sector}");
}

fn send_command(socket: &Path, command: &Command) -> anyhow::Result<UnixStream> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to ringmenud at {}: {}. Is ringmenud running?",
            socket.display(),
            e
        )
    })?;

    writeln!(stream, "{}", command)?;
    Ok(stream)
}

fn print_reply(stream: UnixStream) -> anyhow::Result<()> {
    let mut reply = String::new();
    if BufReader::new(stream).read_line(&mut reply)? == 0 {
        anyhow::bail!("ringmenud closed the connection without replying");
    }
    println!("{}", reply.trim_end());
    Ok(())
}
