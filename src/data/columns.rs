//! Column names of the startup ranking file.

pub const RANK: &str = "Rank";
pub const COMPANY: &str = "Company";
pub const SECTOR: &str = "Sector";
pub const LOCATION: &str = "Location";
pub const LAUNCH_YEAR: &str = "Launch Year";
pub const EMPLOYEES: &str = "Employees";
pub const TOTAL_FUNDING: &str = "Total Funding (€M)";
pub const REVENUE_CAGR: &str = "2-yr Revenue CAGR (%)";

/// Derived from `Sector`.
pub const INDUSTRY: &str = "Industry";
pub const SEGMENT: &str = "Segment";

/// Separator between industry and segment inside `Sector`.
pub const SECTOR_SEPARATOR: &str = " - ";

/// Source columns, in the order the data table shows them.
pub const TABLE_COLUMNS: [&str; 8] = [
    RANK,
    COMPANY,
    SECTOR,
    LOCATION,
    LAUNCH_YEAR,
    EMPLOYEES,
    TOTAL_FUNDING,
    REVENUE_CAGR,
];
