use claybrick_xref::{
    pdf::{Dictionary, Name, Object},
    writer::{Encoder, PositionWriter, Writer},
    Filter, FilterList, PdfSection, Reference, SimpleEncoder, XrefKind,
};
use std::{fs::File, io::BufWriter, path::PathBuf};
use structopt::StructOpt;

/// Write a minimal PDF file with the chosen kind of cross-reference section.
#[derive(StructOpt, Debug)]
#[structopt(name = "claybrick-write-xref")]
struct Opt {
    /// Output file
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,

    /// Write a cross-reference stream instead of a table
    #[structopt(long)]
    stream: bool,

    /// Number of additional filler objects
    #[structopt(long, default_value = "3")]
    objects: u32,

    /// Stream filter: flate, hex, ascii85 or none
    #[structopt(long, default_value = "flate")]
    filter: String,
}

fn dictionary(entries: Vec<(&str, Object)>) -> Object {
    let mut dict = Dictionary::default();
    for (key, value) in entries {
        dict.insert(Name::from(key), value);
    }
    Object::Dictionary(dict)
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let filters = match opt.filter.as_str() {
        "flate" => FilterList::default(),
        "hex" => FilterList::new(vec![Filter::AsciiHex]),
        "ascii85" => FilterList::new(vec![Filter::default(), Filter::Ascii85]),
        "none" => FilterList::none(),
        other => {
            log::error!("Unknown filter `{}`", other);
            return;
        }
    };
    let xref_kind = if opt.stream {
        XrefKind::Stream(filters)
    } else {
        XrefKind::Table
    };

    let mut section = PdfSection::new((1, 4), xref_kind);
    section
        .insert(
            1,
            dictionary(vec![
                ("Type", Object::Name(Name::from("Catalog"))),
                ("Pages", Object::Reference(Reference::new(2, 0))),
            ]),
        )
        .insert(
            2,
            dictionary(vec![
                ("Type", Object::Name(Name::from("Pages"))),
                ("Kids", Object::from(vec![])),
                ("Count", Object::Integer(0)),
            ]),
        )
        .insert(3, dictionary(vec![("Producer", Object::HexString(b"claybrick".to_vec().into()))]));
    for i in 0..opt.objects {
        section.insert(4 + i, Object::Integer(i64::from(i)));
    }
    section
        .trailer
        .set_root(Reference::new(1, 0))
        .set_info(Reference::new(3, 0))
        .set_file_id(*b"claybrick-xref-1", *b"claybrick-xref-1");

    log::debug!("Write to file");
    let file = File::create(&opt.output).expect("Could not create out file");
    let mut writer = PositionWriter::new(BufWriter::new(file));
    if let Err(e) = SimpleEncoder::write_to(&section, &mut writer).and_then(|_| writer.flush()) {
        log::error!("Error while writing: {:?}", e);
        return;
    }
    log::info!("{} bytes written to {}", writer.position(), opt.output.display());
}
