use serde::{Deserialize, Serialize};

/// Statement of a theorem checked by comalg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoremStatement {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Standing hypothesis.
    pub hypothesis: String,
    /// Conditions or sides that are computed independently.
    pub conditions: Vec<String>,
    /// What the theorem asserts about the conditions.
    pub conclusion: String,
    /// Literature references.
    pub references: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Projective ⇔ locally free at primes ⇔ locally free at maximals.
pub fn projective_equivalence() -> TheoremStatement {
    TheoremStatement {
        id: "projective_equivalence".to_string(),
        name: "Noetherian module equivalence".to_string(),
        hypothesis: "A Noetherian, P a finitely generated A-module".to_string(),
        conditions: owned(&[
            "P is projective",
            "P_p is free over A_p for every prime ideal p",
            "P_m is free over A_m for every maximal ideal m",
        ]),
        conclusion: "the three conditions are equivalent".to_string(),
        references: owned(&["Serre, 1955", "Kaplansky, 1958", "Matsumura, 1986"]),
    }
}

/// `⋂ Ass(M) = √Ann(M)`.
pub fn associated_primes_identity() -> TheoremStatement {
    TheoremStatement {
        id: "associated_primes_identity".to_string(),
        name: "Associated primes and the radical of the annihilator".to_string(),
        hypothesis: "A Noetherian, M a finitely generated A-module".to_string(),
        conditions: owned(&["⋂ Ass(M)", "√Ann(M)"]),
        conclusion: "the two ideals are equal".to_string(),
        references: owned(&["Matsumura, 1986"]),
    }
}

/// Every theorem the checker evaluates, in report order.
pub fn catalogue() -> Vec<TheoremStatement> {
    vec![projective_equivalence(), associated_primes_identity()]
}
