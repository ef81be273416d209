//! Hand-authored Markdown examples that seed every generated dataset.

use crate::domain::DatasetRecord;

const BUILTIN: &[(&str, &str)] = &[
    ("How do I create a level 1 header in Markdown?", "# Heading Level 1"),
    ("Create a level 2 header with the text 'Introduction'.", "## Introduction"),
    ("Show me an example of bold text in Markdown using asterisks.", "**Bold Text**"),
    ("How do I italicize text using underscores?", "_Italic Text_"),
    ("Create an unordered list with three items: Apple, Banana, Orange.", "- Apple\n- Banana\n- Orange"),
    ("How do I create a link to Google?", "[Google](https://www.google.com)"),
    ("Insert an image with alt text 'Logo' and source 'logo.png'.", "![Logo](logo.png)"),
    ("Create a code block for Python code that prints 'Hello'.", "```python\nprint('Hello')\n```"),
    ("How do I make a blockquote?", "> This is a blockquote."),
    (
        "Create a table with two columns: Name and Age.",
        "| Name | Age |\n| --- | --- |\n| Alice | 30 |\n| Bob | 25 |",
    ),
    ("How do I add a horizontal rule?", "---"),
    ("Show me how to do a strikethrough.", "~~Strikethrough~~"),
    ("Create a task list with one done item and one todo item.", "- [x] Done item\n- [ ] Todo item"),
    ("How do I escape a special character like an asterisk?", "\\*"),
    ("Create a link that has a title attribute.", "[Link Text](https://example.com \"Title Text\")"),
    ("How do I create a definition list?", "Term\n: Definition"),
    ("Show me how to footnote a sentence.", "This is a sentence.[^1]\n\n[^1]: This is the footnote."),
    ("How do I write a superscript?", "X^2^"),
    ("How do I write a subscript?", "H~2~O"),
    (
        "Create a collapse/expand details section in Markdown (using HTML).",
        "<details>\n<summary>Click to expand</summary>\n\nHidden content goes here.\n</details>",
    ),
    ("How do I highlight text (if supported)?", "==Highlighted Text=="),
    (
        "Create a nested list structure.",
        "1. First Item\n   - Nested Item 1\n   - Nested Item 2\n2. Second Item",
    ),
    ("How can I comment out text in Markdown?", "<!-- This is a comment and will not be rendered -->"),
    (
        "Create a mermaid class diagram example.",
        "```mermaid\nclassDiagram\n    Animal <|-- Duck\n    Animal <|-- Fish\n    Animal <|-- Zebra\n    Animal : +int age\n    Animal : +String gender\n    class Duck{\n      +String beakColor\n      +swim()\n      +quack()\n    }\n    class Fish{\n      -int sizeInFeet\n      -canEat()\n    }\n```",
    ),
    ("What is the syntax for a math block (KaTeX/MathJax)?", "$$ E = mc^2 $$"),
];

/// The built-in example records, in authoring order
pub fn builtin_examples() -> Vec<DatasetRecord> {
    BUILTIN
        .iter()
        .map(|(instruction, output)| DatasetRecord::new(*instruction, *output))
        .collect()
}
