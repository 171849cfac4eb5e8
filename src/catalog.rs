//! # Catalogs
//!
//! Static tables of the recognized entry types and field names, with the required and
//! optional fields of each entry type. The diagnostics engine validates against these
//! tables, and completion or tooltip providers should read the same tables so that their
//! suggestions never disagree with validation.
//!
//! All lookups compare names case-insensitively.
use unicase::UniCase;

/// The recognized entry types.
pub static ENTRY_TYPES: &[&str] = &[
    "article",
    "book",
    "booklet",
    "conference",
    "inbook",
    "incollection",
    "inproceedings",
    "manual",
    "mastersthesis",
    "misc",
    "online",
    "phdthesis",
    "proceedings",
    "techreport",
    "unpublished",
    "webpage",
];

/// The recognized field names.
pub static FIELD_NAMES: &[&str] = &[
    "author",
    "title",
    "journal",
    "year",
    "publisher",
    "booktitle",
    "editor",
    "pages",
    "volume",
    "number",
    "series",
    "edition",
    "month",
    "note",
    "key",
    "address",
    "annote",
    "chapter",
    "crossref",
    "doi",
    "eprint",
    "howpublished",
    "institution",
    "isbn",
    "issn",
    "keywords",
    "language",
    "organization",
    "school",
    "type",
    "url",
    "urldate",
    "abstract",
    "archiveprefix",
    "primaryclass",
    "eid",
    "numpages",
];

/// The three-letter month abbreviations, which standard styles define as macros.
pub static MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// The fields of an entry type, in their declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
    pub entry_type: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

const PROCEEDINGS_PAPER: (&[&str], &[&str]) = (
    &["author", "title", "booktitle", "year"],
    &["editor", "pages", "organization", "publisher", "address", "month", "note"],
);

const THESIS: (&[&str], &[&str]) = (
    &["author", "title", "school", "year"],
    &["address", "month", "note", "type"],
);

/// The field requirements of those entry types which have any.
pub static REQUIREMENTS: &[Requirements] = &[
    Requirements {
        entry_type: "article",
        required: &["author", "title", "journal", "year"],
        optional: &["volume", "number", "pages", "month", "note", "doi", "url", "editor"],
    },
    Requirements {
        entry_type: "book",
        required: &["author", "title", "publisher", "year"],
        optional: &["volume", "series", "address", "edition", "month", "note", "isbn", "editor"],
    },
    Requirements {
        entry_type: "inproceedings",
        required: PROCEEDINGS_PAPER.0,
        optional: PROCEEDINGS_PAPER.1,
    },
    Requirements {
        entry_type: "incollection",
        required: &["author", "title", "booktitle", "publisher", "year"],
        optional: &["editor", "pages", "chapter", "address", "month", "note"],
    },
    Requirements {
        entry_type: "conference",
        required: PROCEEDINGS_PAPER.0,
        optional: PROCEEDINGS_PAPER.1,
    },
    Requirements {
        entry_type: "phdthesis",
        required: THESIS.0,
        optional: THESIS.1,
    },
    Requirements {
        entry_type: "mastersthesis",
        required: THESIS.0,
        optional: THESIS.1,
    },
    Requirements {
        entry_type: "techreport",
        required: &["author", "title", "institution", "year"],
        optional: &["type", "number", "address", "month", "note"],
    },
    Requirements {
        entry_type: "manual",
        required: &["title"],
        optional: &["author", "organization", "address", "edition", "month", "year", "note"],
    },
    Requirements {
        entry_type: "misc",
        required: &["title"],
        optional: &["author", "howpublished", "month", "year", "note", "url"],
    },
    Requirements {
        entry_type: "online",
        required: &["title", "url"],
        optional: &["author", "year", "month", "urldate", "note"],
    },
    Requirements {
        entry_type: "unpublished",
        required: &["author", "title", "note"],
        optional: &["month", "year"],
    },
    Requirements {
        entry_type: "booklet",
        required: &["title"],
        optional: &["author", "howpublished", "address", "month", "year", "note"],
    },
    Requirements {
        entry_type: "proceedings",
        required: &["title", "year"],
        optional: &["editor", "publisher", "organization", "address", "month", "note"],
    },
];

/// A description of an entry type, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTypeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub example: Option<&'static str>,
}

/// A description of a field, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    pub note: Option<&'static str>,
}

macro_rules! entry_info {
    ($name:literal, $description:literal) => {
        EntryTypeInfo {
            name: $name,
            description: $description,
            example: None,
        }
    };
    ($name:literal, $description:literal, $example:literal) => {
        EntryTypeInfo {
            name: $name,
            description: $description,
            example: Some($example),
        }
    };
}

macro_rules! field_info {
    ($name:literal, $description:literal, $example:literal) => {
        FieldInfo {
            name: $name,
            description: $description,
            example: $example,
            note: None,
        }
    };
    ($name:literal, $description:literal, $example:literal, $note:literal) => {
        FieldInfo {
            name: $name,
            description: $description,
            example: $example,
            note: Some($note),
        }
    };
}

pub static ENTRY_TYPE_INFO: &[EntryTypeInfo] = &[
    entry_info!(
        "article",
        "An article published in a journal or magazine.",
        "@article{key,\n  author = {John Doe},\n  title = {Sample Article},\n  journal = {Journal Name},\n  year = {2023}\n}"
    ),
    entry_info!(
        "book",
        "A complete book published by a publisher.",
        "@book{key,\n  author = {Jane Smith},\n  title = {Book Title},\n  publisher = {Publisher},\n  year = {2023}\n}"
    ),
    entry_info!(
        "inproceedings",
        "A paper published in conference proceedings.",
        "@inproceedings{key,\n  author = {Author Name},\n  title = {Paper Title},\n  booktitle = {Conference Proceedings},\n  year = {2023}\n}"
    ),
    entry_info!("incollection", "A part of a book with its own title."),
    entry_info!(
        "conference",
        "Same as inproceedings: a paper in conference proceedings."
    ),
    entry_info!("phdthesis", "A doctoral dissertation."),
    entry_info!("mastersthesis", "A master's thesis."),
    entry_info!(
        "techreport",
        "A technical report published by an institution."
    ),
    entry_info!("manual", "Technical documentation or manual."),
    entry_info!("misc", "For items that don't fit other categories."),
    entry_info!("online", "An online resource or webpage."),
    entry_info!("unpublished", "A document that has not been published."),
    entry_info!("booklet", "A printed work without a named publisher."),
    entry_info!("proceedings", "The proceedings of a conference."),
];

pub static FIELD_INFO: &[FieldInfo] = &[
    field_info!(
        "author",
        "The name(s) of the author(s).",
        "John Doe and Jane Smith",
        "Use \"and\" to separate multiple authors"
    ),
    field_info!("title", "The title of the work.", "A Great Discovery in Science"),
    field_info!("journal", "The name of the journal or magazine.", "Nature"),
    field_info!("year", "The year of publication.", "2023"),
    field_info!("publisher", "The name of the publisher.", "Academic Press"),
    field_info!(
        "booktitle",
        "The title of the book or conference proceedings.",
        "Proceedings of the International Conference"
    ),
    field_info!(
        "editor",
        "The name(s) of the editor(s).",
        "John Editor and Jane Editor",
        "Use \"and\" to separate multiple editors"
    ),
    field_info!(
        "pages",
        "The page numbers.",
        "123--145",
        "Use double dash (--) for page ranges"
    ),
    field_info!("volume", "The volume number of a journal or book.", "42"),
    field_info!("number", "The issue number of a journal.", "3"),
    field_info!(
        "month",
        "The month of publication.",
        "jan",
        "Use three-letter abbreviations without quotes"
    ),
    field_info!("note", "Any additional information.", "In press"),
    field_info!("doi", "Digital Object Identifier.", "10.1000/182"),
    field_info!(
        "url",
        "The URL of an online resource.",
        "https://example.com/paper.pdf"
    ),
    field_info!(
        "urldate",
        "The date when the URL was last accessed.",
        "2023-12-01"
    ),
    field_info!(
        "address",
        "The address of the publisher or institution.",
        "New York, NY"
    ),
    field_info!("edition", "The edition of a book.", "2nd"),
    field_info!(
        "series",
        "The name of a series or set of books.",
        "Lecture Notes in Computer Science"
    ),
    field_info!(
        "school",
        "The name of the school where a thesis was written.",
        "MIT"
    ),
    field_info!(
        "institution",
        "The institution that published a technical report.",
        "Stanford University"
    ),
    field_info!(
        "organization",
        "The organization that sponsored a conference.",
        "IEEE"
    ),
    field_info!("type", "The type of technical report or thesis.", "PhD thesis"),
    field_info!(
        "howpublished",
        "How something unusual has been published.",
        "Self-published"
    ),
    field_info!("chapter", "The chapter number.", "7"),
    field_info!(
        "key",
        "Used for alphabetizing when author is missing.",
        "Anonymous99"
    ),
    field_info!(
        "crossref",
        "The key of another entry to inherit fields from.",
        "conf2023"
    ),
    field_info!("isbn", "International Standard Book Number.", "978-0-123456-78-9"),
    field_info!("issn", "International Standard Serial Number.", "1234-5678"),
    field_info!(
        "keywords",
        "Keywords associated with the entry.",
        "machine learning, artificial intelligence"
    ),
    field_info!(
        "abstract",
        "Abstract or summary of the work.",
        "This paper presents..."
    ),
];

#[inline]
fn eq_ignore_case(a: &str, b: &str) -> bool {
    UniCase::new(a) == UniCase::new(b)
}

pub fn is_known_entry_type(entry_type: &str) -> bool {
    ENTRY_TYPES.iter().any(|known| eq_ignore_case(known, entry_type))
}

pub fn is_known_field(name: &str) -> bool {
    FIELD_NAMES.iter().any(|known| eq_ignore_case(known, name))
}

/// The field requirements of an entry type, if it has any.
pub fn requirements(entry_type: &str) -> Option<&'static Requirements> {
    REQUIREMENTS
        .iter()
        .find(|req| eq_ignore_case(req.entry_type, entry_type))
}

pub fn describe_entry_type(entry_type: &str) -> Option<&'static EntryTypeInfo> {
    ENTRY_TYPE_INFO
        .iter()
        .find(|info| eq_ignore_case(info.name, entry_type))
}

pub fn describe_field(name: &str) -> Option<&'static FieldInfo> {
    FIELD_INFO.iter().find(|info| eq_ignore_case(info.name, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        assert!(is_known_entry_type("Article"));
        assert!(is_known_entry_type("WEBPAGE"));
        assert!(!is_known_entry_type("weird"));
        assert!(is_known_field("DOI"));
        assert!(!is_known_field("colour"));
        assert_eq!(
            requirements("ARTICLE").map(|req| req.required),
            Some(&["author", "title", "journal", "year"][..])
        );
        assert!(requirements("inbook").is_none());
        assert_eq!(
            requirements("conference").map(|req| req.required),
            requirements("inproceedings").map(|req| req.required)
        );
    }

    #[test]
    fn test_catalogs_agree() {
        for req in REQUIREMENTS {
            assert!(is_known_entry_type(req.entry_type), "{}", req.entry_type);
            for name in req.required.iter().chain(req.optional) {
                assert!(is_known_field(name), "{name}");
            }
        }
        for info in ENTRY_TYPE_INFO {
            assert!(requirements(info.name).is_some(), "{}", info.name);
        }
        for info in FIELD_INFO {
            assert!(is_known_field(info.name), "{}", info.name);
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe_field("Pages").and_then(|info| info.note),
            Some("Use double dash (--) for page ranges")
        );
        assert!(describe_entry_type("book").and_then(|info| info.example).is_some());
        assert!(describe_entry_type("webpage").is_none());
        assert_eq!(MONTHS.len(), 12);
    }
}
