//! Prompt construction for the AI quote synthesizer.
//!
//! The system prompt pins the exact output JSON shape; the user turn embeds
//! the concrete project parameters. The design intent is near-deterministic
//! structured output, not creative text.

use quotesmith_core::estimates::EstimateInput;

/// Market-rate guidance lines appended to the system prompt, per currency.
fn rate_guidance(currency: &str) -> &'static str {
    if currency.eq_ignore_ascii_case("USD") {
        "Use realistic US market prices for the project type, area, quality, and location. Reference typical rates:\n\
- Painting: $1.5-4/sq ft depending on quality\n\
- Kitchen Remodel: $100-300/sq ft\n\
- Bathroom Renovation: $80-250/sq ft\n\
- Flooring: $6-22/sq ft\n\
- Labor: $200-500/day per worker"
    } else {
        "Use realistic Indian market prices for the project type, area, quality, and location. Reference typical rates:\n\
- Painting: ₹15-40/sq ft depending on quality\n\
- Kitchen Remodel: ₹1,500-4,000/sq ft\n\
- Bathroom Renovation: ₹1,200-3,500/sq ft\n\
- Flooring: ₹80-350/sq ft\n\
- Labor: ₹500-1,500/day per worker"
    }
}

/// Fixed instruction block pinning the response contract.
pub fn system_prompt(currency: &str, currency_name: &str) -> String {
    format!(
        "You are an expert construction estimator. Generate accurate, realistic quotes in JSON only. \
All prices MUST be in {currency_name}.\n\n\
Output a single valid JSON object (no markdown, no code fence) with this exact shape:\n\
{{\n\
  \"totalCostRange\": {{ \"min\": number, \"max\": number, \"currency\": \"{currency}\" }},\n\
  \"timeline\": {{ \"min\": number, \"max\": number, \"unit\": \"days\" }},\n\
  \"confidence\": \"low\" | \"medium\" | \"high\",\n\
  \"breakdown\": {{ \"materials\": number, \"labor\": number, \"other\": number }},\n\
  \"lineItems\": [\n\
    {{ \"category\": \"materials\"|\"labor\"|\"equipment\"|\"other\", \"item\": string, \"quantity\": number, \"unit\": string, \"unitCost\": number, \"notes\": string (optional) }}\n\
  ],\n\
  \"assumptions\": string[]\n\
}}\n\n\
{guidance}\n\
All amounts should be in {currency_name}.",
        currency = currency,
        currency_name = currency_name,
        guidance = rate_guidance(currency),
    )
}

/// User turn embedding the concrete project parameters.
pub fn user_prompt(input: &EstimateInput) -> String {
    let notes_line = input
        .notes
        .as_deref()
        .filter(|n| !n.is_empty())
        .map(|n| format!("- Notes: {}\n", n))
        .unwrap_or_default();
    format!(
        "Create a detailed estimate for:\n\
- Project: {}\n\
- Area: {} sq ft\n\
- Quality: {}\n\
- Location: {}\n\
{}\n\
Respond with only the JSON object, no other text.",
        input.project_type,
        input.area_square_feet,
        input.quality_level.as_str(),
        input.location,
        notes_line,
    )
}
