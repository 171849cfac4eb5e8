//! # Description of the accepted syntax
//! The goal of this module is to give an explicit description of the grammar recognized by the
//! [lexer](crate::lex) and the [parser](crate::parse). Unlike a validating parser, every input is
//! accepted: the rules below describe how each char is classified, and what happens when the
//! input deviates from them. The rules are written in a PEG-like notation.
//!
//! ## Outside of entries
//! 1. Whitespace is any ASCII char accepted by the
//!    [`is_ascii_whitespace`](https://doc.rust-lang.org/std/primitive.u8.html#method.is_ascii_whitespace)
//!    method.
//!    ```ignore
//!    ws = { (" " | "\t" | "\n" | "\r" | "\x0C")+ }
//!    ```
//! 2. A comment is started by a `%` symbol and ends before the line ending. A `%` only starts a
//!    comment if it is preceded on its line by spaces and tabs alone. The same rule applies
//!    between the tokens of an entry, where any other `%` is skipped as a single unknown char.
//!    ```ignore
//!    comment = { "%" ~ (!("\r\n" | "\n") ~ ANY)* }
//!    ```
//! 3. Free text is any run of chars up to the next `@` or line ending. An `@` which does not begin
//!    an entry is part of the free text which follows it.
//!    ```ignore
//!    free_text = { ANY ~ (!("@" | "\n") ~ ANY)* }
//!    ```
//!
//! ## Identifiers
//! 1. An identifier is any UTF-8 char which is not ASCII, or a printable ASCII char which is not
//!    one of `{}(),=\#%"`.
//!    ```ignore
//!    identifier = { (!('\x00'..'\x20' | "{" | "}" | "(" | ")" | "," | "=" | "\\" | "#" | "%" | "\"" | "\x7f") ~ ANY)+ }
//!    ```
//! 2. A variable is an identifier which does not begin with an ASCII digit. A number is a run of
//!    ASCII digits.
//!    ```ignore
//!    variable = { !ASCII_DIGIT ~ identifier }
//!    number = { ASCII_DIGIT+ }
//!    ```
//! 3. Entry types, citation keys and field names are identifiers.
//!
//! ## Values
//! 1. Inside a braced or quoted value, a `\` followed by ASCII letters is a command, and a `\`
//!    followed by any other char is an escape. An escaped char never opens or closes anything.
//!    ```ignore
//!    command = { "\\" ~ ASCII_ALPHA+ }
//!    escape = { "\\" ~ ANY? }
//!    ```
//! 2. A math run is delimited by `$` or `$$`, and is closed only by the same delimiter. Brackets
//!    inside a math run are tracked separately, and a closing bracket of the enclosing value which
//!    is unbalanced inside the run ends the run.
//!    ```ignore
//!    math = { "$$" ~ (escape | command | !"$$" ~ ANY)* ~ "$$" | "$" ~ (escape | command | !"$" ~ ANY)* ~ "$" }
//!    ```
//! 3. A braced value nests. A quoted value does not nest, and curly brackets inside it are text.
//!    ```ignore
//!    braced = { "{" ~ (escape | command | math | braced | !"}" ~ ANY)* ~ "}" }
//!    quoted = { "\"" ~ (escape | command | math | !"\"" ~ ANY)* ~ "\"" }
//!    ```
//! 4. A value is a sequence of parts joined by `#`. A missing `#` between two parts is tolerated.
//!    ```ignore
//!    part = { braced | quoted | number | variable }
//!    value = { part ~ (ign ~ "#"? ~ ign ~ part)* }
//!    ign = { (ws | comment)* }
//!    ```
//!
//! ## Entries
//! 1. An entry starts with `@` and an identifier which does not begin with an ASCII digit,
//!    possibly separated by whitespace. If no `{` or `(` follows the entry type, the `@` and the
//!    entry type are free text.
//!    ```ignore
//!    entry = { "@" ~ ign ~ entry_type ~ ign ~ ("{" ~ body ~ "}" | "(" ~ body ~ ")") }
//!    ```
//! 2. The body of a `@comment` entry is raw text. A `{` body ends at the first `}` which does not
//!    close a `{` of the body. A `(` body ends at the first `)` outside of curly brackets.
//! 3. The body of a `@preamble` entry is a value.
//! 4. The body of a `@string` entry is a list of fields.
//! 5. The body of any other entry is an optional citation key followed by a list of fields.
//!    Within entries, whitespace and comments may appear between all structural tokens.
//!    ```ignore
//!    field = { field_name ~ ign ~ ("=" ~ ign ~ value?)? }
//!    fields = { ign ~ (field | ",")* }
//!    regular_body = { ign ~ (citation_key ~ ign)? ~ fields }
//!    ```
//!    An identifier directly followed by `=` is a field name, even in the position of the
//!    citation key.
//!
//! ## Recovery
//! 1. A char which is not permitted at its position becomes a single unknown token.
//! 2. An entry whose closing bracket is never found extends to the end of the input. The same
//!    holds for an unclosed braced or quoted value, which keeps the rest of the input as text.
//! 3. A field without `=`, or with nothing after its `=`, has an empty value.
//!
//! ## Differences from bibtex
//! 1. Bibtex does not support `%`-style comments.
//! 2. Bibtex does not capture `@comment` bodies, and resumes scanning for entries directly after
//!    the entry type.
//! 3. Bibtex does not support unicode in identifiers.
//! 4. Bibtex has no notion of math runs. Here, curly brackets inside a closed math run do not
//!    count towards the nesting of a value.
