use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use table_painter::edit::StyleEdit;
use table_painter::memory::MemoryTable;
use table_painter::settings::{builtin_default, SettingsError};
use table_painter::{apply_template, CellStyle, Color, Edge, SettingsStore, Sides, TableLayout};

/// Edit and preview the default table layout applied by the table painter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file to use instead of the one in the user's config directory.
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the settings file location.
    Path,
    /// Print the default layout currently in effect.
    Show,
    /// Overwrite the settings with the built-in default.
    Reset,
    /// Change one section of the default layout.
    Set {
        #[arg(long, value_enum)]
        section: Section,
        /// Background colour, e.g. #4472C4.
        #[arg(long)]
        fill: Option<Color>,
        /// Background transparency in percent.
        #[arg(long)]
        transparency: Option<f32>,
        /// Text colour, e.g. #FFFFFF.
        #[arg(long)]
        font_color: Option<Color>,
        #[arg(long)]
        font_name: Option<String>,
        /// Points.
        #[arg(long)]
        font_size: Option<f32>,
        #[arg(long)]
        bold: Option<bool>,
        #[arg(long)]
        italic: Option<bool>,
        /// Top, bottom, left and right in points, e.g. 3.6,3.6,7.2,7.2.
        #[arg(long, value_delimiter = ',')]
        margins: Option<Vec<f32>>,
    },
    /// Apply the default layout to a blank in-memory table and print the result.
    Preview {
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..=PREVIEW_MAX))]
        rows: u16,
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..=PREVIEW_MAX))]
        columns: u16,
    },
}

/// Largest preview table side.
const PREVIEW_MAX: i64 = 1000;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Section {
    Header,
    Body,
}

fn main() -> Result<(), SettingsError> {
    pretty_env_logger::init();

    log::info!("Entered 'main'");

    let args = Args::parse();
    let store = match args.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::at_default_location(),
    };
    log::debug!("Settings file is {:?}", store.path());

    match args.command {
        Command::Path => println!("{}", store.path().display()),
        Command::Show => print_layout(&store.load_default_layout()),
        Command::Reset => store.save_default_layout(&builtin_default())?,
        Command::Set {
            section,
            fill,
            transparency,
            font_color,
            font_name,
            font_size,
            bold,
            italic,
            margins,
        } => {
            let margins = match margins.as_deref() {
                None => None,
                Some(&[top, bottom, left, right]) => Some(Sides {
                    top,
                    bottom,
                    left,
                    right,
                }),
                Some(_) => Args::command()
                    .error(
                        clap::error::ErrorKind::InvalidValue,
                        "--margins takes exactly four values: top,bottom,left,right",
                    )
                    .exit(),
            };
            let edit = StyleEdit {
                fill_color: fill,
                transparency_percent: transparency,
                font_color,
                font_name,
                font_size,
                bold,
                italic,
                margins,
            };
            if edit.is_empty() {
                log::warn!("Nothing to change");
                return Ok(());
            }

            let mut layout = store.load_default_layout();
            let target = match section {
                Section::Header => &mut layout.header,
                Section::Body => &mut layout.body,
            };
            edit.apply_to(target.get_or_insert_with(CellStyle::default));
            store.save_default_layout(&layout)?;
            print_layout(&layout);
        }
        Command::Preview { rows, columns } => {
            let (rows, columns) = (usize::from(rows), usize::from(columns));
            let table = MemoryTable::new(rows, columns);
            apply_template(&store.load_default_layout(), &table);
            for row in 1..=rows {
                if let Some(style) = table.style(row, 1) {
                    print_style(&format!("row {row}"), &style);
                }
            }
        }
    }

    log::info!("Exiting 'main'");

    Ok(())
}

fn print_layout(layout: &TableLayout) {
    for (label, style) in [("header", &layout.header), ("body", &layout.body)] {
        match style {
            Some(style) => print_style(label, style),
            None => println!("{label}: (unset)"),
        }
    }
}

fn print_style(label: &str, style: &CellStyle) {
    println!("{label}:");
    println!(
        "  fill     {:?} {} ({}% transparent)",
        style.fill_kind,
        style.fill_color,
        (style.fill_transparency * 100.0).round()
    );
    let mut flags = Vec::new();
    if style.font_bold {
        flags.push("bold");
    }
    if style.font_italic {
        flags.push("italic");
    }
    println!(
        "  font     {:?} {}pt {} {}",
        style.font_name,
        style.font_size,
        style.font_color,
        flags.join(" ")
    );
    let m = style.margins;
    println!(
        "  margins  top {} bottom {} left {} right {}",
        m.top, m.bottom, m.left, m.right
    );
    for edge in Edge::ALL {
        let border = style.borders.get(edge);
        if border.visible {
            println!(
                "  {edge:<8} {}pt {:?} {}",
                border.weight, border.dash, border.color
            );
        } else {
            println!("  {edge:<8} hidden");
        }
    }
}
