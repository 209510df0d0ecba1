use clap::{Parser, Subcommand};
use stringsheet_cli::{
    export::{ExportOptions, run_export_command},
    import::{ImportOptions, SheetMode, run_import_command},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export localization resources to a translator spreadsheet
    Export {
        /// Directory containing the per-language resource files
        #[arg(short, long)]
        source_dir: String,

        /// Spreadsheet file to write (.csv or .tsv)
        #[arg(short, long)]
        output: String,

        /// Resource format (android, arb, json); inferred from the
        /// directory contents when omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Template language whose file defines the key order
        #[arg(short, long, default_value = stringsheet::DEFAULT_TEMPLATE_LANGUAGE)]
        template_lang: String,

        /// Advisory note written as an extra row above the header
        #[arg(long)]
        banner: Option<String>,
    },
    /// Import a translated spreadsheet back into resource files
    Import {
        /// Spreadsheet file to read (.csv or .tsv)
        #[arg(short, long)]
        input: String,

        /// Directory to merge the resource files into
        #[arg(short, long)]
        target_dir: String,

        /// Resource format (android, arb, json); inferred from the
        /// target directory contents when omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Which spreadsheet view to read
        #[arg(short, long, value_enum, default_value_t = SheetMode::Full)]
        mode: SheetMode,

        /// Treat empty cells as "no update" instead of explicit blanks
        #[arg(long)]
        skip_empty_cells: bool,

        /// Write a JSON import report to this path
        #[arg(long)]
        report_json: Option<String>,
    },
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Commands::Export {
            source_dir,
            output,
            format,
            template_lang,
            banner,
        } => run_export_command(ExportOptions {
            source_dir,
            output,
            format,
            template_lang,
            banner,
        }),
        Commands::Import {
            input,
            target_dir,
            format,
            mode,
            skip_empty_cells,
            report_json,
        } => run_import_command(ImportOptions {
            input,
            target_dir,
            format,
            mode,
            skip_empty_cells,
            report_json,
        }),
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
