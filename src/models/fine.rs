use serde::Serialize;

/// The eight amount columns a weighbridge record can carry.
///
/// Their sum is the revenue attributed to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FineField {
    AmountDue,
    GvmFine,
    D1Fine,
    D2Fine,
    D3Fine,
    D4Fine,
    AwkwardLoadFine,
    AmountDueDriver,
}

impl FineField {
    pub const ALL: [FineField; 8] = [
        FineField::AmountDue,
        FineField::GvmFine,
        FineField::D1Fine,
        FineField::D2Fine,
        FineField::D3Fine,
        FineField::D4Fine,
        FineField::AwkwardLoadFine,
        FineField::AmountDueDriver,
    ];

    /// Canonical (JSON) field name.
    pub fn key(&self) -> &'static str {
        match self {
            FineField::AmountDue => "amountDue",
            FineField::GvmFine => "gvmFine",
            FineField::D1Fine => "d1Fine",
            FineField::D2Fine => "d2Fine",
            FineField::D3Fine => "d3Fine",
            FineField::D4Fine => "d4Fine",
            FineField::AwkwardLoadFine => "awkwardLoadFine",
            FineField::AmountDueDriver => "amountDueDriver",
        }
    }

    /// Column header used by the weighbridge export.
    pub fn column(&self) -> &'static str {
        match self {
            FineField::AmountDue => "Amount Due",
            FineField::GvmFine => "GVM Fine",
            FineField::D1Fine => "D1 Fine",
            FineField::D2Fine => "D2 Fine",
            FineField::D3Fine => "D3 Fine",
            FineField::D4Fine => "D4 Fine",
            FineField::AwkwardLoadFine => "Awkward Load Fine",
            FineField::AmountDueDriver => "Amount Due Driver",
        }
    }

    /// Match a sheet header (case-insensitive, surrounding blanks ignored).
    pub fn from_column(header: &str) -> Option<Self> {
        let h = header.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.column().eq_ignore_ascii_case(h) || f.key().eq_ignore_ascii_case(h))
    }
}
