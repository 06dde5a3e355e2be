use std::fmt::{self, Write};

use comalg_thy::{CheckReport, ScenarioOutcome, TheoremStatement};

fn write_theorem(out: &mut String, theorem: Option<&TheoremStatement>) -> fmt::Result {
    if let Some(theorem) = theorem {
        writeln!(out, "theorem: {}", theorem.name)?;
        writeln!(out, "hypothesis: {}", theorem.hypothesis)?;
    }
    Ok(())
}

fn write_outcome(
    out: &mut String,
    theorems: &[TheoremStatement],
    outcome: &ScenarioOutcome,
) -> fmt::Result {
    writeln!(
        out,
        "== {} :: {} over {} ==",
        outcome.name, outcome.module, outcome.ring
    )?;

    let equivalence = &outcome.projective_equivalence;
    write_theorem(out, theorems.iter().find(|t| t.id == "projective_equivalence"))?;
    writeln!(out, "projective: {}", equivalence.projective)?;
    writeln!(
        out,
        "locally_free_at_primes: {}",
        equivalence.locally_free_at_primes
    )?;
    writeln!(
        out,
        "locally_free_at_maximals: {}",
        equivalence.locally_free_at_maximals
    )?;
    writeln!(out, "equivalence_holds: {}", equivalence.equivalence_holds)?;

    let identity = &outcome.associated_primes_identity;
    write_theorem(
        out,
        theorems.iter().find(|t| t.id == "associated_primes_identity"),
    )?;
    let primes: Vec<&str> = identity
        .associated_primes
        .iter()
        .map(|assoc| assoc.prime.display.as_str())
        .collect();
    writeln!(out, "annihilator: {}", identity.annihilator.display)?;
    writeln!(
        out,
        "radical_of_annihilator: {}",
        identity.radical_of_annihilator.display
    )?;
    writeln!(out, "associated_primes: {{{}}}", primes.join(", "))?;
    writeln!(
        out,
        "intersection_of_associated_primes: {}",
        identity.intersection.display
    )?;
    writeln!(out, "identity_holds: {}", identity.identity_holds)
}

/// Line oriented layout of a report followed by a pass/fail banner.
pub fn render_text(report: &CheckReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for outcome in &report.outcomes {
        write_outcome(&mut out, &report.theorems, outcome)?;
        out.push('\n');
    }
    let failures = report.failures().count();
    if failures == 0 {
        writeln!(
            out,
            "PASS: both theorems hold in all {} scenarios",
            report.outcomes.len()
        )?;
    } else {
        writeln!(
            out,
            "FAIL: {failures} of {} scenarios report a counterexample",
            report.outcomes.len()
        )?;
    }
    writeln!(out, "analysis_hash: {}", report.analysis_hash)?;
    Ok(out)
}
