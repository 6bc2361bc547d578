//! Centralized default constants for texture-notes.
//!
//! **This module is the single source of truth** for shared default values:
//! profile layout names, name restrictions, and the built-in LaTeX
//! templates. All crates reference these constants instead of defining
//! their own copies.

// =============================================================================
// PROFILE LAYOUT
// =============================================================================

/// Directory name of a binder profile, created under the chosen root.
pub const PROFILE_DIRECTORY_NAME: &str = "texture-notes-profile";

/// Directory under the profile holding one directory per subject.
pub const NOTES_DIRECTORY_NAME: &str = "notes";

/// Directory under the profile holding shared stylesheets.
pub const STYLES_DIRECTORY_NAME: &str = "styles";

/// Catalog database file, stored inside the notes directory.
pub const NOTES_DB_FILENAME: &str = "notes.db";

/// Shared latexmk configuration at the profile root, linked into every
/// subject directory.
pub const LATEXMKRC_FILENAME: &str = "latexmkrc";

/// Per-subject directory for figures.
pub const GRAPHICS_DIRECTORY_NAME: &str = "graphics";

/// Per-subject bibliography stub.
pub const BIBLIOGRAPHY_FILENAME: &str = "ref.bib";

/// File stem of the per-subject aggregate document.
pub const MAIN_NOTE_STEM: &str = "main";

/// Preferences file at the profile root.
pub const PREFERENCES_FILENAME: &str = "texture-notes.pref.json";

// =============================================================================
// NAME RESTRICTIONS
// =============================================================================

/// Maximum length of a subject display name.
pub const SUBJECT_NAME_MAX_LEN: usize = 128;

/// Maximum length of a note title.
pub const NOTE_TITLE_MAX_LEN: usize = 256;

/// Keywords that may never be used as subject names (compared
/// case-insensitively). These are selector tokens of the CLI surface.
pub const RESERVED_SUBJECT_NAMES: &[&str] = &[":all:", ":except:"];

/// Keywords and filenames that may never be used as note titles.
pub const RESERVED_NOTE_TITLES: &[&str] = &[
    ":all:",
    ":main:",
    ":union:",
    "stylesheets",
    "graphics",
    "readme",
    "main",
];

// =============================================================================
// COMPILATION
// =============================================================================

/// Default compiler command invoked per note file.
pub const COMPILER_COMMAND: &str = "latexmk";

/// Default arguments passed before the note path.
pub const COMPILER_ARGS: &[&str] = &["-pdf", "-interaction=nonstopmode"];

/// Default per-invocation timeout in seconds.
pub const COMPILE_TIMEOUT_SECS: u64 = 300;

/// Default text editor for opening notes.
pub const NOTE_EDITOR: &str = "vim";

/// Default author substituted into document templates.
pub const DOCUMENT_AUTHOR: &str = "";

// =============================================================================
// TEMPLATES
// =============================================================================

/// Shared latexmkrc written at profile creation. Points TEXINPUTS at the
/// profile-level styles directory, two levels up from any subject dir.
pub const LATEXMKRC_TEMPLATE: &str = "ensure_path( 'TEXINPUTS', '../../styles//' );";

/// Boilerplate for a freshly created note document.
pub const LATEX_SUBFILE_TEMPLATE: &str = r"\documentclass[class=memoir, crop=false, oneside, 14pt]{standalone}

% document metadata
\author{${__author__}}
\title{${__title__}}
\date{${__date__}}

\begin{document}

\end{document}
";

/// Boilerplate for the per-subject aggregate document.
pub const LATEX_MAIN_FILE_TEMPLATE: &str = r"\documentclass[class=memoir, crop=false, oneside, 12pt]{standalone}

% document metadata
\author{${__author__}}
\title{${__title__}}
\date{${__date__}}

\begin{document}
${__preface__}
${__main__}
\end{document}
";

/// Date format used when substituting `${__date__}` in templates.
pub const TEMPLATE_DATE_FORMAT: &str = "%B %d, %Y";

/// File extension of figure stubs under a subject's graphics directory.
pub const FIGURE_FILE_EXTENSION: &str = "svg";

/// Blank Inkscape-flavored canvas written for each requested figure stub.
/// 240mm x 120mm with a 10mm grid, one empty layer.
pub const SVG_FIGURE_TEMPLATE: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- Created with Inkscape (http://www.inkscape.org/) -->

<svg
   xmlns:dc="http://purl.org/dc/elements/1.1/"
   xmlns:cc="http://creativecommons.org/ns#"
   xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
   xmlns:svg="http://www.w3.org/2000/svg"
   xmlns="http://www.w3.org/2000/svg"
   xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"
   xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
   width="240mm"
   height="120mm"
   viewBox="0 0 240 120"
   version="1.1"
   id="svg8"
   sodipodi:docname="figure.svg">
  <defs
     id="defs2" />
  <sodipodi:namedview
     id="base"
     pagecolor="#ffffff"
     bordercolor="#666666"
     borderopacity="1.0"
     inkscape:document-units="mm"
     inkscape:current-layer="layer1"
     showgrid="false"
     showborder="true"
     showguides="true">
    <inkscape:grid
       type="xygrid"
       id="grid815"
       units="mm"
       spacingx="10"
       spacingy="10"
       empspacing="4"
       dotted="false" />
  </sodipodi:namedview>
  <metadata
     id="metadata5">
    <rdf:RDF>
      <cc:Work
         rdf:about="">
        <dc:format>image/svg+xml</dc:format>
        <dc:type
           rdf:resource="http://purl.org/dc/dcmitype/StillImage" />
        <dc:title />
      </cc:Work>
    </rdf:RDF>
  </metadata>
  <g
     inkscape:label="Layer 1"
     inkscape:groupmode="layer"
     id="layer1"
     transform="translate(0,-177)" />
</svg>
"##;
