use std::path::PathBuf;

use getopts::Options;
use tracing::warn;

use crate::config::CONFIG_FILE;

#[derive(Clone, Debug, Default)]
pub struct Args {
    pub cfg_file: PathBuf,
    // test helper
    pub cfg_str: Option<String>,
}

pub fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [options] [config_file]", program);
    print!("{}", opts.usage(&brief));
}

pub fn get_args() -> Args {
    parse_args(std::env::args().collect())
}

pub fn parse_args(args: Vec<String>) -> Args {
    let program = args.first().cloned().unwrap_or_else(|| "dsweather".to_owned());
    let mut opts = Options::new();
    opts.optopt("c", "config", "configuration file", "FILE");
    opts.optflag("h", "help", "print this help");

    let default_args = Args { cfg_file: default_cfg_file(), cfg_str: None };
    let matches = match opts.parse(args.iter().skip(1)) {
        Ok(m) => m,
        Err(f) => {
            warn!("Error parsing arguments: {}", f);
            warn!("Proceeding with defaults.");
            print_usage(&program, opts);
            return default_args;
        }
    };
    if matches.opt_present("h") {
        print_usage(&program, opts);
        std::process::exit(0);
    }

    let Some(config_file_path) = matches.opt_str("c").or_else(|| matches.free.first().cloned()) else {
        return default_args;
    };
    let path = PathBuf::from(&config_file_path);
    if !path.exists() {
        warn!(file = %config_file_path, "Config file does not exist. Proceeding with defaults.");
        return default_args;
    }

    Args { cfg_file: path, cfg_str: None }
}

pub fn default_cfg_file() -> PathBuf {
    std::env::current_dir().unwrap_or_default().join(CONFIG_FILE)
}
