//! Python source fragments for the emitted batch script.
//!
//! The configuration section between [`HEADER`] and [`BODY`] is generated;
//! these fragments are emitted verbatim.

pub(super) const HEADER: &str = r##"#!/usr/bin/env python3
"""Batch renderer for extracted document elements.

Re-applies a captured filter, cleaning and rendering configuration to a
.json element file, or to every .json file in a directory, writing one
<name>_output.txt per input. Standard library only.

Usage: python generated_script.py [input_path] [output_dir]
"""

import json
import os
import re
import sys
import unicodedata


###############################
### USER DEFINED VARIABLES ####
###############################

# Input file path or directory with multiple JSON files
input_path = '/input_path'  # Replace with your file or directory path, or pass it as the first argument

# Output directory for saving the results
output_dir = '/output_dir'  # Replace with your output directory path, or pass it as the second argument


###############################
### APP DEFINED VARIABLES #####
###############################

"##;

pub(super) const BODY: &str = r##"
###############################
### PIPELINE ##################
###############################

NO_TEXT = "No text available"
NO_CATEGORY = "No category"
MISSING_FIELD = "N/A"
METADATA_HEADER = "Metadata (Selected):"
NO_METADATA_LINE = "Selected Metadata: None"
RULE = "-" * 80
MARK = "#" * 5
NON_ASCII = re.compile(r"[^\x20-\x7e\t\n\x0b\x0c\r]")
WHITESPACE = re.compile(r"[ \t\n\x0b\x0c\r]+")


def load_elements(file_path):
    with open(file_path, "rb") as f:
        data = json.loads(f.read().decode("utf-8"))
    # Lone surrogates decode from JSON escapes but are not valid text
    json.dumps(data, ensure_ascii=False).encode("utf-8")
    if not isinstance(data, list):
        raise ValueError("expected a JSON array of elements")
    elements = []
    for record in data:
        if not isinstance(record, dict):
            raise ValueError("expected every element to be a JSON object")
        category = record.get("type", record.get("category"))
        if category is not None and not isinstance(category, str):
            raise ValueError("expected element category to be a string")
        text = record.get("text")
        if text is not None and not isinstance(text, str):
            raise ValueError("expected element text to be a string")
        metadata = record.get("metadata")
        if metadata is None:
            metadata = {}
        if not isinstance(metadata, dict):
            raise ValueError("expected element metadata to be a JSON object")
        elements.append({"category": category, "text": text, "metadata": metadata})
    return elements


def filter_elements_by_category(elements, categories):
    return [e for e in elements if e["category"] is not None and e["category"] in categories]


def clean_text(text):
    for old, new in quote_replacements:
        text = text.replace(old, new)
    text = NON_ASCII.sub("", unicodedata.normalize("NFKD", text))
    return WHITESPACE.sub(" ", text).strip()


def clean_text_elements(elements):
    for element in elements:
        if element["text"] is not None:
            element["text"] = clean_text(element["text"])
    return elements


def extract_selected_metadata(elements, selected_fields):
    if not selected_fields:
        return [dict(e["metadata"]) for e in elements]
    return [
        {field: e["metadata"][field] for field in selected_fields if field in e["metadata"]}
        for e in elements
    ]


def format_value(value):
    if isinstance(value, str):
        return value
    return json.dumps(value, ensure_ascii=False, separators=(",", ":"))


def element_text(element):
    return element["text"] if element["text"] is not None else NO_TEXT


def construct_display_text(elements, metadata_list):
    if only_text:
        return "\n\n".join(element_text(e) for e in elements)
    blocks = []
    for element, metadata in zip(elements, metadata_list):
        category = element["category"] if element["category"] is not None else NO_CATEGORY
        block = MARK + " " + category + " " + MARK + "\n\n"
        if metadata_to_include:
            lines = [
                key + ": " + (format_value(metadata[key]) if key in metadata else MISSING_FIELD)
                for key in metadata_to_include
            ]
            block += METADATA_HEADER + "\n" + "\n".join(lines) + "\n\n"
        else:
            block += NO_METADATA_LINE + "\n\n"
        if element["text"] is not None and apply_cleaning:
            block += clean_text(element["text"])
        else:
            block += element_text(element)
        block += "\n" + RULE
        blocks.append(block)
    return "\n\n".join(blocks)


def output_file_name(file_path):
    return os.path.splitext(os.path.basename(file_path))[0] + "_output.txt"


def process_json_file(file_path, destination):
    elements = load_elements(file_path)
    filtered = filter_elements_by_category(elements, categories_to_include)
    if apply_cleaning:
        clean_text_elements(filtered)
    metadata_list = extract_selected_metadata(filtered, metadata_to_include)
    display_text = construct_display_text(filtered, metadata_list).encode("utf-8")
    output_file = os.path.join(destination, output_file_name(file_path))
    with open(output_file, "wb") as f:
        f.write(display_text)
    return output_file


def json_files(path):
    if os.path.isdir(path):
        names = sorted(
            name for name in os.listdir(path)
            if os.path.splitext(name)[1] == ".json" and os.path.isfile(os.path.join(path, name))
        )
        return [os.path.join(path, name) for name in names]
    if os.path.isfile(path) and os.path.splitext(path)[1] == ".json":
        return [path]
    raise ValueError("unsupported input: " + path + " (expected a .json file or a directory)")


def main(argv):
    source = argv[1] if len(argv) > 1 else input_path
    destination = argv[2] if len(argv) > 2 else output_dir
    try:
        files = json_files(source)
    except ValueError as exc:
        print("Error: " + str(exc), file=sys.stderr)
        return 2
    os.makedirs(destination, exist_ok=True)
    failures = 0
    for file_path in files:
        try:
            output_file = process_json_file(file_path, destination)
        except Exception as exc:
            failures += 1
            print("Failed to process " + file_path + ": " + str(exc), file=sys.stderr)
        else:
            print("Wrote " + output_file)
    return 1 if failures else 0


if __name__ == "__main__":
    sys.exit(main(sys.argv))
"##;
