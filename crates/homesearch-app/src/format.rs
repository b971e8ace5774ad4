// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub fn format_price(dollars: u64) -> String {
    format!("${}", comma_format(dollars))
}

pub fn format_count(value: u64) -> String {
    comma_format(value)
}

fn comma_format(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let mut chars = digits.chars().collect::<Vec<_>>();
    let mut count = 0usize;
    while let Some(ch) = chars.pop() {
        if count == 3 {
            out.push(',');
            count = 0;
        }
        out.push(ch);
        count += 1;
    }
    out.chars().rev().collect()
}
