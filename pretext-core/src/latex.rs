//! LaTeX fragments emitted by marker callbacks.
//!
//! The listing environments themselves are opened and closed by marker
//! `add_text` entries (see [`crate::markers`]); this module builds the
//! vocabulary-dependent pieces: the `lstdefinestyle` blocks and the
//! keyword dump.

/// `\begin{Verbatim}` keyword dump written by `%%listkeywords`, one
/// keyword per line.
pub fn keyword_dump(keywords: &[String]) -> String {
    let mut out = String::from("\\begin{Verbatim}[commandchars=\\\\\\{\\}]\n");
    for keyword in keywords {
        out.push_str(keyword);
        out.push('\n');
    }
    out.push_str("\\end{Verbatim}\n");
    out
}

/// The BNF listing style, with nonterminals as `morekeywords` so they
/// render bold inside grammar listings.
pub fn bnf_listing_style(nonterminals: &[String]) -> String {
    format!(
        "\n\
         \\lstdefinestyle{{BNFstyle}}{{\n\
         \x20   language=BNF,%\n\
         \x20   frame=single,%\n\
         \x20   backgroundcolor=\\color{{bnfgreen}},%\n\
         \x20   morekeywords={{{}}}%\n\
         }}\n",
        nonterminals.join(", ")
    )
}

/// The P4 listing style, with the scraped keyword set bolded in code
/// listings.
pub fn p4_listing_style(keywords: &[String]) -> String {
    format!(
        "\n\
         \\lstdefinestyle{{P4style}}{{\n\
         \x20   language=C,%\n\
         \x20   frame=single,%\n\
         \x20   backgroundcolor=\\color{{codeblue}},%\n\
         \x20   keywords={{{}}},%\n\
         \x20   basicstyle=\\ttfamily,%\n\
         \x20   aboveskip=3mm,%\n\
         \x20   belowskip=3mm,%\n\
         \x20   fontadjust=true,%\n\
         \x20   keepspaces=true,%\n\
         \x20   keywordstyle=\\bfseries,%\n\
         \x20   captionpos=b,%\n\
         \x20   framerule=0.3pt,%\n\
         \x20   firstnumber=0,%\n\
         \x20   numbersep=1.5mm,%\n\
         \x20   numberstyle=\\tiny,%\n\
         }}\n",
        keywords.join(", ")
    )
}
