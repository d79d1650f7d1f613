// CLI definitions using clap

use clap::{Parser, Subcommand};
use hori_controller::{Profile, Stick};
use hori_driver::numeric::{parse_byte, parse_profile, parse_size, parse_usize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hori")]
#[command(author, version, about = "Configuration memory tool for HORI GIP controllers")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Index of the controller to use (see `hori devices`)
    #[arg(short, long, global = true, value_parser = parse_usize)]
    pub device: Option<usize>,

    /// Config file path (default: ~/.config/hori/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List connected controllers
    #[command(visible_alias = "list")]
    Devices,

    /// Dump profile memory as hex
    #[command(visible_alias = "dump")]
    Hexdump {
        /// Profile (1-4)
        #[arg(value_parser = parse_profile)]
        profile: Profile,
        /// Start offset
        #[arg(default_value = "0", value_parser = parse_usize)]
        ofs: usize,
        /// Number of bytes (default: up to the end of the profile region)
        #[arg(value_parser = parse_size)]
        size: Option<usize>,
    },

    /// Write raw bytes to profile memory
    Write {
        /// Profile (1-4)
        #[arg(value_parser = parse_profile)]
        profile: Profile,
        /// Start offset
        #[arg(value_parser = parse_usize)]
        ofs: usize,
        /// Byte values (0-255)
        #[arg(required = true, value_parser = parse_byte)]
        data: Vec<u8>,
    },

    /// Show the active profile, optionally switching first
    #[command(visible_alias = "p")]
    Profile {
        /// Profile to activate (1-4)
        #[arg(value_parser = parse_profile)]
        profile: Option<Profile>,
    },

    /// Show or change button mappings
    ///
    /// Each argument is `BUTTON=FUNCTION` or `default`, applied in order.
    #[command(visible_alias = "remap")]
    Map {
        /// Profile (1-4)
        #[arg(value_parser = parse_profile)]
        profile: Profile,
        /// Mapping changes
        mappings: Vec<String>,
    },

    /// Restore the factory configuration of a profile
    Reset {
        /// Profile (1-4)
        #[arg(value_parser = parse_profile)]
        profile: Profile,
    },

    /// Show or change profile names
    Name {
        /// Profile (1-4); all profiles when omitted
        #[arg(value_parser = parse_profile)]
        profile: Option<Profile>,
        /// New name, at most 16 characters
        name: Option<String>,
    },

    /// Show or change which stick the analog stick acts as
    Stick {
        /// Profile (1-4)
        #[arg(value_parser = parse_profile)]
        profile: Profile,
        /// LS or RS
        #[arg(value_parser = parse_stick)]
        stick: Option<Stick>,
    },

    /// Show name, mappings and stick of every profile
    #[command(visible_alias = "all")]
    Info,

    /// Show the controller's version reply
    #[command(visible_alias = "ver")]
    Version,
}

fn parse_stick(s: &str) -> Result<Stick, String> {
    s.parse().map_err(|e: hori_controller::ControllerError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("hori").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_hexdump_defaults() {
        let cli = parse(&["hexdump", "2"]).unwrap();
        match cli.command {
            Commands::Hexdump { profile, ofs, size } => {
                assert_eq!(profile.number(), 2);
                assert_eq!(ofs, 0);
                assert_eq!(size, None);
            }
            _ => panic!("expected hexdump"),
        }
    }

    #[test]
    fn test_write_prefixed_values() {
        let cli = parse(&["-d", "1", "write", "1", "0x20", "0x1", "255", "0b11"]).unwrap();
        assert_eq!(cli.device, Some(1));
        match cli.command {
            Commands::Write { ofs, data, .. } => {
                assert_eq!(ofs, 0x20);
                assert_eq!(data, vec![1, 255, 3]);
            }
            _ => panic!("expected write"),
        }
    }

    #[test]
    fn test_invalid_arguments_rejected() {
        assert!(parse(&["write", "1", "0", "256"]).is_err());
        assert!(parse(&["write", "1", "0"]).is_err());
        assert!(parse(&["hexdump", "5"]).is_err());
        assert!(parse(&["hexdump", "1", "0", "0"]).is_err());
        assert!(parse(&["stick", "1", "DS"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_optional_positionals() {
        let cli = parse(&["name"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Name {
                profile: None,
                name: None
            }
        ));

        let cli = parse(&["stick", "3", "rs"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Stick {
                stick: Some(Stick::Rs),
                ..
            }
        ));
    }

    #[test]
    fn test_log_level_default() {
        let cli = parse(&["info"]).unwrap();
        assert_eq!(cli.log_level, "warn");
        assert_eq!(cli.config, None);
    }
}
