use std::path::PathBuf;
use structopt::StructOpt;

/// Print the cross-reference table of the given PDF file.
#[derive(StructOpt, Debug)]
#[structopt(name = "claybrick-read-xref")]
struct Opt {
    /// Input file
    #[structopt(short, long, parse(from_os_str))]
    input: PathBuf,
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let rows = match claybrick_xref::read_xref_table(opt.input.as_path()) {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Error while parsing: {:?}", e);
            return;
        }
    };

    for row in rows {
        println!(
            "{:>6} {:010} {:05} {}",
            row.number,
            row.offset,
            row.generation,
            if row.free { 'f' } else { 'n' }
        );
    }
}
