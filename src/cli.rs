// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing, help, and the
//! one-shot commands that run without the TUI.
use crate::config::Config;
use crate::context::AppContext;
use crate::controller::{GeneratorController, ScannerController, SocialController};
use crate::model::{Field, Mode, link};
use crate::platform::desktop::{DesktopPlatform, render_qr_png, render_qr_text};
use anyhow::{Result, bail};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tui,
    Help,
    Modes,
    Social {
        mode: Mode,
        fields: Vec<(Field, String)>,
        output: Output,
    },
    Text {
        content: String,
        message: Option<String>,
        output: Output,
    },
    Scan {
        image: PathBuf,
    },
}

/// What to do with a generated QR code besides printing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    pub png: Option<PathBuf>,
    pub share: bool,
    pub save: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub command: Command,
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.clone()),
        None => bail!("Missing value for {}", flag),
    }
}

/// Maps a `--flag` to a social field. Accepts camelCase field names plus a few
/// short aliases.
fn field_for_flag(flag: &str) -> Option<Field> {
    let name = flag.strip_prefix("--")?;
    match name {
        "country" => Some(Field::CountryCode),
        "phone" => Some(Field::PhoneNumber),
        "email" => Some(Field::EmailAddress),
        "subject" => Some(Field::EmailSubject),
        "body" => Some(Field::EmailBody),
        "message" => Some(Field::CustomMessage),
        other => Field::from_str(other).ok(),
    }
}

/// Parses the arguments after the binary name. Global flags are only read
/// before the subcommand; everything after it belongs to the subcommand.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut root = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--root" => root = Some(PathBuf::from(take_value(args, &mut i, "--root")?)),
            "-h" | "--help" | "help" => {
                return Ok(Invocation {
                    root,
                    command: Command::Help,
                });
            }
            _ => break,
        }
        i += 1;
    }
    let rest = &args[i..];

    let command = match rest.first().map(String::as_str) {
        None => Command::Tui,
        Some("modes") => Command::Modes,
        Some("social") => parse_social(&rest[1..])?,
        Some("text") => parse_text(&rest[1..])?,
        Some("scan") => match rest.get(1) {
            Some(path) => Command::Scan {
                image: PathBuf::from(path),
            },
            None => bail!("Usage: socialqr scan <image>"),
        },
        Some(other) => bail!("Unknown command '{}'. See --help.", other),
    };

    Ok(Invocation { root, command })
}

fn parse_output_flag(args: &[String], i: &mut usize, output: &mut Output) -> Result<bool> {
    match args[*i].as_str() {
        "-o" | "--out" => output.png = Some(PathBuf::from(take_value(args, i, "--out")?)),
        "--share" => output.share = true,
        "--save" => output.save = true,
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_social(args: &[String]) -> Result<Command> {
    let Some(mode_arg) = args.first() else {
        bail!("Usage: socialqr social <mode> [--<field> <value>]...");
    };
    let mode = Mode::from_str(&mode_arg.to_lowercase())
        .map_err(|_| anyhow::anyhow!("Unknown mode '{}'. Run 'socialqr modes'.", mode_arg))?;

    let mut fields = Vec::new();
    let mut output = Output::default();
    let mut i = 1;
    while i < args.len() {
        if !parse_output_flag(args, &mut i, &mut output)? {
            let flag = args[i].clone();
            if !flag.starts_with('-') {
                // A bare value fills the mode's required field.
                fields.push((mode.required_field(), flag));
            } else {
                let Some(field) = field_for_flag(&flag) else {
                    bail!("Unknown option '{}'", flag);
                };
                fields.push((field, take_value(args, &mut i, &flag)?));
            }
        }
        i += 1;
    }

    Ok(Command::Social {
        mode,
        fields,
        output,
    })
}

fn parse_text(args: &[String]) -> Result<Command> {
    let mut content = None;
    let mut message = None;
    let mut output = Output::default();
    let mut i = 0;
    while i < args.len() {
        if !parse_output_flag(args, &mut i, &mut output)? {
            match args[i].as_str() {
                "-m" | "--message" => message = Some(take_value(args, &mut i, "--message")?),
                value if content.is_none() => content = Some(value.to_string()),
                extra => bail!("Unexpected argument '{}'", extra),
            }
        }
        i += 1;
    }
    if output.save {
        bail!("--save is only available for social QR codes");
    }
    Ok(Command::Text {
        content: content.unwrap_or_default(),
        message,
        output,
    })
}

/// Runs a one-shot command. `Command::Tui` is handled by the binary.
pub async fn run_command(command: Command, ctx: Arc<dyn AppContext>, cfg: &Config) -> Result<()> {
    let desktop = DesktopPlatform::new(ctx.clone(), cfg.qr_module_pixels);

    match command {
        Command::Tui => bail!("The TUI is not available in this build"),
        Command::Help => print_help("socialqr"),
        Command::Modes => print_modes(),
        Command::Social {
            mode,
            fields,
            output,
        } => {
            let mut social = SocialController::new(ctx, desktop.platform(), cfg);
            social.switch_mode(mode);
            for (field, value) in fields {
                social.update_field(field, value);
            }
            let value = social.generate().map_err(notice_error)?;
            print_qr(&value, Some(link::display_label(mode, social.fields()).as_str()))?;

            if let Some(png) = &output.png {
                render_qr_png(&value, cfg.qr_module_pixels, png)?;
                println!("Wrote {}", png.display());
            }
            if output.share {
                let path = social.share_image().await.map_err(notice_error)?;
                println!("Ready to share: {}", path.display());
            }
            if output.save {
                let notice = social.save_to_gallery().await.map_err(notice_error)?;
                println!("{}", notice.message);
            }
        }
        Command::Text {
            content,
            message,
            output,
        } => {
            let mut generator = GeneratorController::new(ctx, desktop.platform());
            generator.set_content(content);
            if let Some(msg) = message {
                generator.set_custom_message(msg);
            }
            let value = generator.generate().map_err(notice_error)?;
            let label = generator.custom_message().to_string();
            print_qr(&value, (!label.is_empty()).then_some(label.as_str()))?;

            if let Some(png) = &output.png {
                render_qr_png(&value, cfg.qr_module_pixels, png)?;
                println!("Wrote {}", png.display());
            }
            if output.share {
                let path = generator.share_image().await.map_err(notice_error)?;
                println!("Ready to share: {}", path.display());
            }
        }
        Command::Scan { image } => {
            let platform = desktop.platform();
            let mut scanner = ScannerController::new(&platform);
            scanner.start().await.map_err(notice_error)?;
            desktop.picker.set_next(Some(image));
            let outcome = scanner.pick_from_gallery().await.map_err(notice_error)?;
            match scanner.result() {
                Some(result) => {
                    println!("{}", result);
                    if result.is_openable() {
                        log::info!("Scanned content is a link");
                    }
                }
                None => {
                    if let Some(notice) = outcome.notice() {
                        bail!("{}: {}", notice.title, notice.message);
                    }
                }
            }
        }
    }
    Ok(())
}

fn notice_error(err: crate::error::AppError) -> anyhow::Error {
    let notice = err.to_notice();
    anyhow::anyhow!("{}: {}", notice.title, notice.message)
}

fn print_qr(value: &str, label: Option<&str>) -> Result<()> {
    if let Some(label) = label {
        println!("{}", label);
    }
    println!("{}", render_qr_text(value)?);
    println!("{}", value);
    Ok(())
}

fn print_modes() {
    for mode in Mode::all() {
        let info = mode.info();
        let fields: Vec<String> = mode.fields().iter().map(|f| format!("--{}", f)).collect();
        println!("{:<10} {:<28} {}", mode, info.subtitle, fields.join(" "));
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "SocialQR v{} - Social, contact and text QR codes, plus a scanner",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {}                                    Start interactive TUI", binary_name);
    println!("    {} social <mode> [--<field> <value>]...", binary_name);
    println!("    {} text <content> [--message <label>]", binary_name);
    println!("    {} scan <image>", binary_name);
    println!("    {} modes                              List modes and their fields", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config, cache and exports.");
    println!("    -o, --out <file.png>  Also write the QR code as a PNG.");
    println!("    --share               Export the QR image for sharing.");
    println!("    --save                Save the QR image to the gallery (social only).");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("FIELDS:");
    println!("    --phone, --country    WhatsApp number and dialling code (default +91)");
    println!("    --email, --subject, --body");
    println!("    --instagramUsername, --twitterHandle, --linkedinProfile,");
    println!("    --githubUsername, --facebookProfile");
    println!("    --message             Label shown with the QR code");
    println!();
    println!("EXAMPLES:");
    println!("    {} social whatsapp --country 44 --phone \"07700 900123\"", binary_name);
    println!("    {} social instagram @someone --message \"Follow us\"", binary_name);
    println!("    {} social email --email a@b.com --subject Hi", binary_name);
    println!("    {} text \"https://example.org\" --message \"Scan me\" -o qr.png", binary_name);
    println!("    {} scan ~/Pictures/SocialQR/code.png", binary_name);
    println!();
    println!("MORE INFO:");
    println!("    License:    GPL-3.0");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_starts_tui() {
        let inv = parse_args(&[]).unwrap();
        assert_eq!(inv.command, Command::Tui);
        assert_eq!(inv.root, None);
    }

    #[test]
    fn root_is_global() {
        let inv = parse_args(&args(&["--root", "/tmp/x", "modes"])).unwrap();
        assert_eq!(inv.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(inv.command, Command::Modes);
    }

    #[test]
    fn global_flags_stop_at_the_subcommand() {
        let inv = parse_args(&args(&["-r", "/tmp/x", "help"])).unwrap();
        assert_eq!(inv.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(inv.command, Command::Help);

        let inv = parse_args(&args(&["text", "help"])).unwrap();
        assert_eq!(
            inv.command,
            Command::Text {
                content: "help".to_string(),
                message: None,
                output: Output::default(),
            }
        );

        let inv = parse_args(&args(&["social", "github", "--help"]));
        assert!(inv.is_err());
        let inv = parse_args(&args(&["social", "github", "help"])).unwrap();
        let Command::Social { fields, .. } = inv.command else {
            panic!("expected social command");
        };
        assert_eq!(fields, vec![(Field::GithubUsername, "help".to_string())]);

        let inv = parse_args(&args(&["text", "hello", "--root", "/tmp/x"]));
        assert!(inv.is_err());
        assert!(parse_args(&args(&["--verbose", "modes"])).is_err());
    }

    #[test]
    fn social_fields_and_aliases() {
        let inv = parse_args(&args(&[
            "social",
            "WhatsApp",
            "--country",
            "44",
            "--phoneNumber",
            "123",
            "--share",
        ]))
        .unwrap();
        assert_eq!(
            inv.command,
            Command::Social {
                mode: Mode::Whatsapp,
                fields: vec![
                    (Field::CountryCode, "44".to_string()),
                    (Field::PhoneNumber, "123".to_string())
                ],
                output: Output {
                    share: true,
                    ..Output::default()
                },
            }
        );
    }

    #[test]
    fn bare_value_fills_required_field() {
        let inv = parse_args(&args(&["social", "github", "octocat"])).unwrap();
        let Command::Social { fields, .. } = inv.command else {
            panic!("expected social command");
        };
        assert_eq!(fields, vec![(Field::GithubUsername, "octocat".to_string())]);
    }

    #[test]
    fn unknown_mode_and_flag_are_errors() {
        assert!(parse_args(&args(&["social", "myspace"])).is_err());
        assert!(parse_args(&args(&["social", "github", "--nope", "x"])).is_err());
        assert!(parse_args(&args(&["social", "github", "--githubUsername"])).is_err());
    }

    #[test]
    fn text_command() {
        let inv = parse_args(&args(&["text", "hello", "-m", "Label", "-o", "out.png"])).unwrap();
        assert_eq!(
            inv.command,
            Command::Text {
                content: "hello".to_string(),
                message: Some("Label".to_string()),
                output: Output {
                    png: Some(PathBuf::from("out.png")),
                    ..Output::default()
                },
            }
        );
        assert!(parse_args(&args(&["text", "a", "b"])).is_err());
        assert!(parse_args(&args(&["text", "a", "--save"])).is_err());
    }

    #[test]
    fn scan_requires_path() {
        assert!(parse_args(&args(&["scan"])).is_err());
        assert_eq!(
            parse_args(&args(&["scan", "a.png"])).unwrap().command,
            Command::Scan {
                image: PathBuf::from("a.png")
            }
        );
    }
}
