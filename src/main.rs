use hangman::art::AsciiFont;
use hangman::cli::{CliInterface, TextStyle, display_rules, parse_cli};
use hangman::config::{Mode, Settings};
use hangman::logging::{self, Fallback};
use hangman::tui::TuiInterface;
use hangman::{GameState, SessionEnd, game_loop, load_dictionary, persistence};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

const EXIT_FATAL: u8 = 1;
const EXIT_SAVE_ERROR: u8 = 2;

fn load_font(settings: &Settings) -> AsciiFont {
    let Some(path) = &settings.letter_file else {
        return AsciiFont::embedded();
    };
    match AsciiFont::from_file(path) {
        Ok(font) => font,
        Err(e) => {
            log::warn!("Font '{}' unusable: {e}", path.display());
            eprintln!(
                "Unrecognized letter file '{}' ({e}), using the standard font.",
                path.display()
            );
            AsciiFont::embedded()
        }
    }
}

fn start_game(settings: &Settings) -> Result<GameState, ExitCode> {
    if let Some(path) = &settings.resume {
        return persistence::load(path).map_err(|e| {
            eprintln!("Error while loading the game state: {e}");
            ExitCode::from(EXIT_SAVE_ERROR)
        });
    }

    let words = load_dictionary(settings.dictionary.as_deref()).map_err(|e| {
        eprintln!("Failed to load dictionary: {e}");
        ExitCode::from(EXIT_FATAL)
    })?;
    log::info!("Loaded {} words", words.len());

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    GameState::new(&words, &mut rng).map_err(|e| {
        eprintln!("Cannot start a game: {e}");
        ExitCode::from(EXIT_FATAL)
    })
}

fn main() -> ExitCode {
    let cli = parse_cli();
    if cli.rules {
        display_rules();
        return ExitCode::SUCCESS;
    }
    let settings = Settings::from_cli(&cli);

    let fallback = if settings.mode == Mode::Panel {
        Fallback::Silent
    } else {
        Fallback::Stderr
    };
    logging::init(&settings.log_path, fallback);
    log::info!("Starting in {:?} mode", settings.mode);

    let mut state = match start_game(&settings) {
        Ok(state) => state,
        Err(code) => return code,
    };
    let font = load_font(&settings);

    let end = match settings.mode {
        Mode::Panel => {
            let mut interface = match TuiInterface::new(font) {
                Ok(interface) => interface,
                Err(e) => {
                    eprintln!("Failed to initialise the terminal: {e}");
                    return ExitCode::from(EXIT_FATAL);
                }
            };
            let end = game_loop(&mut state, &mut interface, &settings.save_path);
            // Restore the terminal before printing anything.
            drop(interface);
            end
        }
        Mode::Ascii | Mode::Classic => {
            let style = if settings.mode == Mode::Ascii {
                TextStyle::Ascii(font)
            } else {
                TextStyle::Classic
            };
            let mut interface = CliInterface::new(io::stdin().lock(), style);
            game_loop(&mut state, &mut interface, &settings.save_path)
        }
    };

    log::info!("Session ended: {end:?}");
    match end {
        SessionEnd::Saved(path) => {
            if settings.mode == Mode::Panel {
                println!("Game saved in {}", path.display());
            }
            ExitCode::SUCCESS
        }
        SessionEnd::SaveFailed(reason) => {
            if settings.mode == Mode::Panel {
                eprintln!("Game save failed : {reason}");
            }
            ExitCode::from(EXIT_SAVE_ERROR)
        }
        SessionEnd::Won | SessionEnd::Lost | SessionEnd::Quit => ExitCode::SUCCESS,
    }
}
