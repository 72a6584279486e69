use std::path::PathBuf;

use boolsearch::engine_error;
use boolsearch_indexer::Indexer;
use structopt::StructOpt;

/// Build an inverted index snapshot from a folder of crawled pages.
#[derive(StructOpt, Debug)]
#[structopt(name = "indexer")]
struct Opt {
    /// Folder with the crawler's JSON output
    #[structopt(short = "i", long = "input-folder", parse(from_os_str))]
    input_folder: PathBuf,

    /// Path of the snapshot to write
    #[structopt(short = "o", long = "output-name", parse(from_os_str))]
    output_name: PathBuf,

    /// Enable debug logging
    #[structopt(short, long)]
    verbose: bool,
}

fn main() {
    let opt = Opt::from_args();
    boolsearch::init_logging(opt.verbose);

    match Indexer::run(&opt.input_folder, &opt.output_name) {
        Ok(stats) => println!("{}", stats),
        Err(err) => {
            engine_error!("Indexer", opt.input_folder.display(), "{}", err);
            std::process::exit(1);
        }
    }
}
