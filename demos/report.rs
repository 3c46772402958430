//! Lays out a multi-page project report: a title page with cover art, numbered sections,
//! lists, label/value lines and a verbatim listing, with running headers and page
//! numbers.
//!
//! ```text
//! RUST_LOG=debug cargo run --example report -- --output report.pdf
//! ```

use clap::Parser;
use pdf_flow::{
    render_document, FlowConfig, FontFamily, FontResolver, Info, Manuscript, Mm, Pt,
    RunningTitle, Weight,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "report")]
#[command(about = "Render a sample project report to PDF", long_about = None)]
struct Cli {
    /// Where to write the PDF
    #[arg(short, long, value_name = "FILE", default_value = "report.pdf")]
    output: PathBuf,

    /// Directory to look in for fonts before the system font directories
    #[arg(long, value_name = "DIR")]
    font_dir: Option<PathBuf>,

    /// Word printed before the page number in the footer
    #[arg(long, default_value = "Page")]
    page_label: String,
}

fn title_page(doc: &mut Manuscript) {
    doc.gap(Mm(50.0))
        .title("LODESTAR", Pt(24.0), Weight::Bold)
        .gap(Mm(5.0))
        .title(
            "A self-hosted index for\nsharing field recordings between archives",
            Pt(16.0),
            Weight::Regular,
        )
        .gap(Mm(10.0))
        .cover_art("cover art", Mm(70.0).into(), Mm(45.0).into())
        .gap(Mm(10.0))
        .title("Project documentation", Pt(13.0), Weight::Regular)
        .gap(Mm(20.0))
        .title("2025/2026", Pt(12.0), Weight::Regular)
        .page_break();
}

fn body(doc: &mut Manuscript) {
    doc.heading(1, "1", "TOPIC").paragraph(
        "Lodestar is a small service that lets sound archives publish catalogues of their \
         field recordings and find matching material held by other archives, without a \
         central server owning the index.",
    );

    doc.heading(1, "2", "AUTHORS")
        .italic("(Author details are left out of the sample document.)");

    doc.heading(1, "3", "SUMMARY")
        .heading(2, "3.1.", "Goals")
        .paragraph(
            "The project aims to make catalogue exchange boring: archives run one binary, \
             point it at their metadata export, and the rest happens in the background.",
        )
        .numbered(1, "Publish catalogue entries under stable, content-derived identifiers")
        .numbered(2, "Answer keyword queries from peers within a fixed time budget")
        .numbered(3, "Keep every archive in control of what it shares");

    doc.heading(2, "3.2.", "Technologies")
        .label_value("Language: ", "Rust 2021, single static binary")
        .label_value("Storage: ", "an append-only log with a rebuilt in-memory index")
        .label_value(
            "Transport: ",
            "TCP with length-prefixed frames for queries, plain HTTP for catalogue downloads \
             and a small gossip protocol for peer discovery",
        )
        .label_value("Език на интерфейса: ", "английски и български");

    doc.heading(2, "3.3.", "Architecture");
    for (n, (module, duty, items)) in modules().into_iter().enumerate() {
        doc.bold(format!("Module {}: {module}", n + 1))
            .paragraph(format!("Responsibility: {duty}"));
        for item in items {
            doc.bullet(item);
        }
        doc.gap(Mm(2.0));
    }

    doc.heading(3, "", "Wire format")
        .paragraph("Every query frame starts with a fixed header:")
        .verbatim([
            "offset  size  field",
            "0       4     magic \"LDST\"",
            "4       2     version",
            "6       2     flags",
            "8       4     payload length",
        ]);

    doc.heading(2, "3.4.", "Conclusion");
    for _ in 0..4 {
        doc.paragraph(lipsum::lipsum(120));
    }
}

fn modules() -> Vec<(&'static str, &'static str, Vec<&'static str>)> {
    vec![
        (
            "Catalogue",
            "parse metadata exports and keep the local index current.",
            vec![
                "Reads CSV and JSON exports, one entry per recording",
                "Derives identifiers from a hash of the normalised title and duration",
                "Rebuilds the in-memory index from the log at start-up",
            ],
        ),
        (
            "Peers",
            "find other archives and keep a table of reachable ones.",
            vec![
                "Seeds the table from a configured list of addresses",
                "Exchanges partial peer tables every few minutes",
                "Drops peers that miss three consecutive pings",
            ],
        ),
        (
            "Search",
            "fan keyword queries out to peers and merge the answers.",
            vec![
                "Queries at most eight peers in parallel",
                "Deduplicates results by identifier, keeping the most complete entry",
                "Returns whatever arrived when the four second budget runs out",
            ],
        ),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut resolver = FontResolver::default();
    if let Some(dir) = cli.font_dir.as_ref() {
        // try the bundled names in the given directory first, in chain order
        for family in [
            FontFamily::liberation_serif(dir),
            FontFamily::dejavu_serif(dir),
            FontFamily::times_new_roman(dir),
        ] {
            resolver = resolver.prefer(family);
        }
    }
    let family = resolver.load()?;
    log::info!("setting the report in {}", family.name);

    let mut manuscript = Manuscript::new();
    title_page(&mut manuscript);
    body(&mut manuscript);

    let decorator = RunningTitle::new("Lodestar: project documentation").page_label(cli.page_label);
    let mut document = render_document(&manuscript, FlowConfig::default(), family, decorator)?;
    let mut info = Info::new();
    info.title("Lodestar")
        .subject("Project documentation")
        .keywords("archives, field recordings, search");
    document.set_info(info);
    document.write_to_path(&cli.output)?;

    println!("PDF generated: {}", cli.output.display());
    println!("Pages: {}", document.page_count());
    Ok(())
}
