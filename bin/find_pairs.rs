use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use serde_json::json;

use basepairs_chem::load_residues_from_file;
use basepairs_pairs::{FinderConfig, PairFinder, QualityScorer};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
/// Command line tool to identify and classify base pairs in a nucleic acid structure.
///
/// Reads a PDB-format structure, detects hydrogen bonds and base pairs, and
/// prints the selected pairs with their quality scores.
///
/// say find_pairs -h to see options
struct Args {
    /// input nucleic acid structure in PDB format
    infile: String,
    /// directory with idealized base pair templates, one subdirectory per LW class
    #[clap(long)]
    idealized_dir: Option<PathBuf>,
    /// directory with flat exemplar base pair templates
    #[clap(long)]
    exemplar_dir: Option<PathBuf>,
    /// use the strict validation preset and a 0.5 score floor
    #[clap(long)]
    strict: bool,
    /// minimum quality score for a selected pair
    #[clap(long)]
    min_score: Option<f64>,
    /// accept pairs without the mutual-best requirement
    #[clap(long)]
    no_mutual: bool,
    /// print the result as JSON
    #[clap(short = 'j', long)]
    json: bool,
    /// also list rejected candidates with their reason codes
    #[clap(long)]
    rejected: bool,
    /// be more verbose and log program actions on the screen
    #[clap(short = 'v', long)]
    verbose: bool
}

fn main() {
    // ---------- app setup ----------
    let args = Args::parse();
    if env::var("RUST_LOG").is_err() { env::set_var("RUST_LOG", "info") }
    if args.verbose {
        env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    // ---------- INPUT section ----------
    let residues = match load_residues_from_file(Path::new(&args.infile), None) {
        Ok(residues) => residues,
        Err(error) => {
            eprintln!("Can't read {}: {}", args.infile, error);
            std::process::exit(1);
        }
    };
    info!("Read {} residues from {}", residues.len(), args.infile);

    let mut config = if args.strict { FinderConfig::strict() } else { FinderConfig::default() };
    if let Some(min_score) = args.min_score { config.min_score = min_score; }
    if args.no_mutual { config.require_mutual = false; }

    // ---------- Find base pairs ----------
    let mut finder = match (&args.idealized_dir, &args.exemplar_dir) {
        (Some(idealized), Some(exemplar)) => PairFinder::with_templates(config, idealized, exemplar),
        _ => PairFinder::new(config),
    };
    let result = finder.find_pairs(&residues);

    // ---------- OUTPUT section ----------
    if args.json {
        let pairs: Vec<_> = result.pairs.iter().map(|pair| json!({
            "res_id1": pair.res_id1,
            "res_id2": pair.res_id2,
            "sequence": pair.sequence(),
            "lw_class": pair.lw_class,
            "score": pair.quality_score,
            "grade": QualityScorer::score_to_grade(pair.quality_score).to_string(),
            "dorg": pair.validation.dorg,
            "d_v": pair.validation.d_v,
            "plane_angle": pair.validation.plane_angle,
            "d_nn": pair.validation.d_nn,
            "hbonds": pair.hbonds.iter().map(|hb| json!({
                "donor": format!("{}.{}", hb.donor_res_id, hb.donor_atom),
                "acceptor": format!("{}.{}", hb.acceptor_res_id, hb.acceptor_atom),
                "distance": hb.distance,
                "extended": hb.extended,
            })).collect::<Vec<_>>(),
        })).collect();

        let mut report = json!({
            "candidates_total": result.candidates_total,
            "candidates_valid": result.candidates_valid,
            "pairs": pairs,
        });
        if args.rejected {
            report["rejected"] = result.selection.rejected.iter().map(|(candidate, reason)| json!({
                "res_id1": candidate.res_id1,
                "res_id2": candidate.res_id2,
                "reason": reason,
            })).collect::<Vec<_>>().into();
        }
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
        return;
    }

    for pair in &result.pairs {
        let lw = pair.lw_class.as_deref().unwrap_or("----");
        println!("{:12} {:12} {:4} {:4} {:.3} {}  {} H-bonds",
                 pair.res_id1, pair.res_id2, pair.sequence(), lw,
                 pair.quality_score, QualityScorer::score_to_grade(pair.quality_score),
                 pair.hbonds.iter().filter(|hb| hb.is_base_base()).count());
    }
    println!("# {} pairs selected from {} candidates ({} valid)",
             result.pairs.len(), result.candidates_total, result.candidates_valid);

    if args.rejected {
        for (candidate, reason) in &result.selection.rejected {
            println!("# rejected {:12} {:12} {}", candidate.res_id1, candidate.res_id2, reason);
        }
    }
}
