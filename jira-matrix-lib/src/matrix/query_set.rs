use strum::{Display, EnumIter};

/// The four fixed issue sets the matrix is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum QuerySet {
    Accepted,
    Rejected,
    Doable,
    #[strum(to_string = "Non Doable")]
    NonDoable,
}
