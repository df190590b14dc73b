use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::error::{BoardError, Result};
use crate::settings::{load_settings, save_settings, settings_path};

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let s = load_settings();
            println!("{}", settings_path().display().to_string().dimmed());
            println!("export_dir:     {}", s.export_dir);
            println!("sheet_name:     {}", s.sheet_name);
            println!("page_size:      {}", s.page_size);
            println!("default_format: {}", s.format().extension());
        }
        ConfigCommands::Set {
            export_dir,
            sheet_name,
            page_size,
            format,
        } => {
            if export_dir.is_none() && sheet_name.is_none() && page_size.is_none() && format.is_none() {
                return Err(BoardError::Settings(
                    "nothing to set (use --export-dir, --sheet-name, --page-size or --format)"
                        .to_string(),
                ));
            }
            let mut s = load_settings();
            if let Some(dir) = export_dir {
                s.export_dir = dir;
            }
            if let Some(name) = sheet_name {
                s.sheet_name = name;
            }
            if let Some(size) = page_size {
                if size == 0 {
                    return Err(BoardError::Settings("page size must be at least 1".to_string()));
                }
                s.page_size = size;
            }
            if let Some(f) = format {
                s.default_format = f.extension().to_string();
            }
            save_settings(&s)?;
            println!("{} Settings saved.", "✓".green());
        }
    }
    Ok(())
}
