use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub const DEPARTMENT_COLUMN: &str = "DEPARTMENT_ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Text,
    Integer,
}

impl ColumnType {
    pub fn sql(self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
        }
    }
}

/// A submitted form field and the table column it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub column: &'static str,
    pub column_type: ColumnType,
}

const fn text(label: &'static str, column: &'static str) -> Field {
    Field {
        label,
        column,
        column_type: ColumnType::Text,
    }
}

const fn integer(label: &'static str, column: &'static str) -> Field {
    Field {
        label,
        column,
        column_type: ColumnType::Integer,
    }
}

const JOURNAL_FIELDS: &[Field] = &[
    text("Authors", "AUTHORS"),
    integer("Year of publication", "YEAR_OF_PUBLICATION"),
    text("Title", "TITLE"),
    text("Journal name", "JOURNAL_NAME"),
    text("Volume and page number", "VOLUME_PAGE_NUMBER"),
    text("ISSN", "ISSN"),
    text("Impact factor", "IMPACT_FACTOR"),
];

const CONFERENCE_FIELDS: &[Field] = &[
    integer("Year of publication", "YEAR_OF_PUBLICATION"),
    text("Authors", "AUTHOR"),
    text("Title", "TITLE"),
    text("Conference Name", "CONFERENCE_NAME"),
    text("Volume and page count", "VOLUME_PAGE_COUNT"),
    text("Organized by", "ORGANIZED_BY"),
    text("Place of conference", "PLACE_OF_CONFERENCE"),
];

const BOOK_CHAPTER_FIELDS: &[Field] = &[
    integer("Year of publication", "YEAR_OF_PUBLICATION"),
    text("Authors", "AUTHOR"),
    text("Chapter title", "CHAPTER_TITLE"),
    text("Book title", "BOOK_TITLE"),
    text("Publisher", "PUBLISHER"),
    text("ISSN", "ISSN"),
];

const FUNDED_RESEARCH_PROJECT_FIELDS: &[Field] = &[
    text("Principal investigator", "PRINCIPAL_INVESTIGATOR"),
    text("Co-investigators", "CO_INVESTIGATORS"),
    text("Title", "TITLE"),
    text("Funding agency", "FUNDING_AGENCY"),
    text("Amount sanctioned", "AMOUNT_SANCTIONED"),
    integer("Year of sanction", "YEAR_OF_SANCTION"),
    text("Duration", "DURATION"),
];

const RESEARCH_PROPOSAL_SUBMITTED_FIELDS: &[Field] = &[
    text("Principal investigator", "PRINCIPAL_INVESTIGATOR"),
    text("Title", "TITLE"),
    text("Funding agency", "FUNDING_AGENCY"),
    text("Amount requested", "AMOUNT_REQUESTED"),
    text("Date of submission", "DATE_OF_SUBMISSION"),
    text("Status", "STATUS"),
];

const CONSULTANCY_FIELDS: &[Field] = &[
    text("Faculty name", "FACULTY_NAME"),
    text("Title", "TITLE"),
    text("Client", "CLIENT"),
    text("Amount", "AMOUNT"),
    integer("Year", "YEAR"),
];

const PRODUCT_DEVELOPMENT_FIELDS: &[Field] = &[
    text("Developers", "DEVELOPERS"),
    text("Product name", "PRODUCT_NAME"),
    text("Description", "DESCRIPTION"),
    integer("Year", "YEAR"),
];

const PATENT_FIELDS: &[Field] = &[
    text("Inventors", "INVENTORS"),
    text("Title", "TITLE"),
    text("Application number", "APPLICATION_NUMBER"),
    text("Date of filing", "DATE_OF_FILING"),
    text("Status", "STATUS"),
];

const FDP_WORKSHOP_SEMINAR_FIELDS: &[Field] = &[
    text("Faculty name", "FACULTY_NAME"),
    text("Event title", "EVENT_TITLE"),
    text("Event type", "EVENT_TYPE"),
    text("Organized by", "ORGANIZED_BY"),
    text("Duration", "DURATION"),
    text("Date", "EVENT_DATE"),
];

const MOU_CS_FIELDS: &[Field] = &[
    text("Organization", "ORGANIZATION"),
    text("Purpose", "PURPOSE"),
    text("Date of signing", "DATE_OF_SIGNING"),
    text("Duration", "DURATION"),
    text("Coordinator", "COORDINATOR"),
];

const ACHIEVEMENTS_AND_AWARDS_FIELDS: &[Field] = &[
    text("Recipient", "RECIPIENT"),
    text("Award name", "AWARD_NAME"),
    text("Awarding body", "AWARDING_BODY"),
    integer("Year", "YEAR"),
];

const MOUS_FIELDS: &[Field] = &[
    text("Organization", "ORGANIZATION"),
    text("Purpose", "PURPOSE"),
    text("Date of signing", "DATE_OF_SIGNING"),
    text("Validity", "VALIDITY"),
];

const FUNDED_STUDENT_PROJECT_FIELDS: &[Field] = &[
    text("Students", "STUDENTS"),
    text("Guide", "GUIDE"),
    text("Title", "TITLE"),
    text("Funding agency", "FUNDING_AGENCY"),
    text("Amount sanctioned", "AMOUNT_SANCTIONED"),
    integer("Year", "YEAR"),
];

/// The research record categories, each backed by its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Journal,
    Conference,
    BookChapter,
    FundedResearchProject,
    ResearchProposalSubmitted,
    Consultancy,
    ProductDevelopment,
    Patent,
    FdpWorkshopSeminar,
    MouCs,
    AchievementsAndAwards,
    Mous,
    FundedStudentProject,
}

static CATEGORIES_BY_TABLE: Lazy<HashMap<&'static str, Category>> = Lazy::new(|| {
    Category::ALL
        .iter()
        .map(|category| (category.table(), *category))
        .collect()
});

impl Category {
    /// Every category in the order the admin count view reports them.
    pub const ALL: [Category; 13] = [
        Category::Journal,
        Category::Conference,
        Category::BookChapter,
        Category::FundedResearchProject,
        Category::ResearchProposalSubmitted,
        Category::Consultancy,
        Category::ProductDevelopment,
        Category::Patent,
        Category::FdpWorkshopSeminar,
        Category::MouCs,
        Category::AchievementsAndAwards,
        Category::Mous,
        Category::FundedStudentProject,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Category::Journal => "JOURNAL",
            Category::Conference => "CONFERENCE",
            Category::BookChapter => "BOOKCHAPTER",
            Category::FundedResearchProject => "FUNDEDRESEARCHPROJECT",
            Category::ResearchProposalSubmitted => "RESEARCHPROPOSALSUBMITTED",
            Category::Consultancy => "CONSULTANCY",
            Category::ProductDevelopment => "PRODUCTDEVELOPMENT",
            Category::Patent => "PATENT",
            Category::FdpWorkshopSeminar => "FDPWORKSHOPSEMINAR",
            Category::MouCs => "MOUCS",
            Category::AchievementsAndAwards => "ACHIEVEMENTSANDAWARDS",
            Category::Mous => "MOUS",
            Category::FundedStudentProject => "FUNDEDSTUDENTPROJECT",
        }
    }

    /// Prefix of the submission form fields, as in `Journal-Authors`.
    pub fn form_prefix(self) -> &'static str {
        match self {
            Category::Journal => "Journal",
            Category::Conference => "Conference",
            Category::BookChapter => "BookChapter",
            Category::FundedResearchProject => "FundedResearchProject",
            Category::ResearchProposalSubmitted => "ResearchProposalSubmitted",
            Category::Consultancy => "Consultancy",
            Category::ProductDevelopment => "ProductDevelopment",
            Category::Patent => "Patent",
            Category::FdpWorkshopSeminar => "FDPWorkshopSeminar",
            Category::MouCs => "MoUCS",
            Category::AchievementsAndAwards => "AchievementsAndAwards",
            Category::Mous => "MoUs",
            Category::FundedStudentProject => "FundedStudentProject",
        }
    }

    /// Columns after `DEPARTMENT_ID`, in table order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Category::Journal => JOURNAL_FIELDS,
            Category::Conference => CONFERENCE_FIELDS,
            Category::BookChapter => BOOK_CHAPTER_FIELDS,
            Category::FundedResearchProject => FUNDED_RESEARCH_PROJECT_FIELDS,
            Category::ResearchProposalSubmitted => RESEARCH_PROPOSAL_SUBMITTED_FIELDS,
            Category::Consultancy => CONSULTANCY_FIELDS,
            Category::ProductDevelopment => PRODUCT_DEVELOPMENT_FIELDS,
            Category::Patent => PATENT_FIELDS,
            Category::FdpWorkshopSeminar => FDP_WORKSHOP_SEMINAR_FIELDS,
            Category::MouCs => MOU_CS_FIELDS,
            Category::AchievementsAndAwards => ACHIEVEMENTS_AND_AWARDS_FIELDS,
            Category::Mous => MOUS_FIELDS,
            Category::FundedStudentProject => FUNDED_STUDENT_PROJECT_FIELDS,
        }
    }

    /// Label of the field whose presence decides whether a submission
    /// contains a record of this category.
    pub fn key_label(self) -> &'static str {
        match self {
            Category::Journal | Category::Conference | Category::BookChapter => "Authors",
            Category::FundedResearchProject | Category::ResearchProposalSubmitted => {
                "Principal investigator"
            }
            Category::Consultancy | Category::FdpWorkshopSeminar => "Faculty name",
            Category::ProductDevelopment => "Developers",
            Category::Patent => "Inventors",
            Category::MouCs | Category::Mous => "Organization",
            Category::AchievementsAndAwards => "Recipient",
            Category::FundedStudentProject => "Students",
        }
    }

    pub fn form_field(self, label: &str) -> String {
        format!("{}-{}", self.form_prefix(), label)
    }

    pub fn key_field(self) -> String {
        self.form_field(self.key_label())
    }

    /// All column names, `DEPARTMENT_ID` first.
    pub fn columns(self) -> Vec<&'static str> {
        std::iter::once(DEPARTMENT_COLUMN)
            .chain(self.fields().iter().map(|field| field.column))
            .collect()
    }

    /// Returns the canonical column name when `column` belongs to this table.
    pub fn column(self, column: &str) -> Option<&'static str> {
        self.columns()
            .into_iter()
            .find(|candidate| *candidate == column)
    }

    /// Looks up a category by its table name. Matching is exact, callers
    /// upper-case user input first.
    pub fn from_table(table: &str) -> Option<Self> {
        CATEGORIES_BY_TABLE.get(table).copied()
    }

    pub fn create_table_sql(self) -> String {
        let columns: Vec<String> = self
            .fields()
            .iter()
            .map(|field| format!("    {} {}", field.column, field.column_type.sql()))
            .collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {} INTEGER NOT NULL CHECK ({} BETWEEN 0 AND 4),\n{}\n);\n",
            self.table(),
            DEPARTMENT_COLUMN,
            DEPARTMENT_COLUMN,
            columns.join(",\n")
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_prefix())
    }
}
