//! Build automation tasks for the slcd-kit project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for slcd-kit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: build lib for the watch target, run host tests, generate docs
    CheckAll,
    /// Build the library for an embedded target
    Build {
        #[arg(long, default_value = "cortex-m0")]
        arch: Arch,
        /// Enable defmt logging
        #[arg(long)]
        defmt: bool,
    },
    /// Run unit, integration and doc tests on the host
    Test,
    /// Build documentation
    Doc {
        #[arg(long, default_value = "cortex-m0")]
        arch: Arch,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Arch {
    /// Cortex-M0+ watch boards
    CortexM0,
    /// Cortex-M33 boards
    CortexM33,
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arch::CortexM0 => write!(f, "cortex-m0"),
            Arch::CortexM33 => write!(f, "cortex-m33"),
        }
    }
}

impl Arch {
    fn target(self) -> &'static str {
        match self {
            Arch::CortexM0 => "thumbv6m-none-eabi",
            Arch::CortexM33 => "thumbv8m.main-none-eabihf",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build { arch, defmt } => build_lib(arch, defmt),
        Commands::Test => run_host_tests(),
        Commands::Doc { arch } => build_docs(arch),
    }
}

fn check_all() -> ExitCode {
    println!("{}", "==> Building library...".cyan());
    for arch in [Arch::CortexM0, Arch::CortexM33] {
        for defmt in [false, true] {
            println!(
                "  {}",
                format!("- {arch}{}", if defmt { " +defmt" } else { "" }).bright_black()
            );
            if !cargo_build_lib(arch, defmt) {
                return ExitCode::FAILURE;
            }
        }
    }

    println!("\n{}", "==> Running host tests...".cyan());
    if run_host_tests() != ExitCode::SUCCESS {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if build_docs(Arch::CortexM0) != ExitCode::SUCCESS {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed!".green().bold());
    ExitCode::SUCCESS
}

fn build_lib(arch: Arch, defmt: bool) -> ExitCode {
    println!(
        "{}",
        format!("Building library for {arch} ({})", arch.target()).cyan()
    );
    if cargo_build_lib(arch, defmt) {
        println!("{}", "Build successful!".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cargo_build_lib(arch: Arch, defmt: bool) -> bool {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(workspace_root())
        .args(["build", "--lib", "--target", arch.target()]);
    if defmt {
        cmd.args(["--features", "defmt"]);
    }
    run_command(&mut cmd)
}

fn run_host_tests() -> ExitCode {
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let mut test_cmd = Command::new("cargo");
    test_cmd
        .current_dir(workspace_root())
        .args(["test", "--package", "slcd-kit"]);
    if let Some(target) = host_target {
        test_cmd.arg("--target").arg(target);
    }

    if run_command(&mut test_cmd) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_docs(arch: Arch) -> ExitCode {
    if run_command(Command::new("cargo").current_dir(workspace_root()).args([
        "doc",
        "--lib",
        "--target",
        arch.target(),
        "--no-deps",
        "--features",
        "defmt",
    ])) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn workspace_root() -> std::path::PathBuf {
    // xtask lives one level below the workspace root.
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| std::path::PathBuf::from("."), std::path::Path::to_path_buf)
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_string())
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
