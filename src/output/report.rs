use super::{render_items_html, render_options_html, View};
use crate::records::{SortField, SortOrder};

fn radio(name: &str, value: &str, label: &str, checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!(
        r#"<label class="inline-flex items-center gap-2 mr-4"><input type="radio" name="{name}" value="{value}"{checked}/> {label}</label>"#
    )
}

fn indent(block: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    block
        .lines()
        .map(|l| format!("{pad}{l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_html(view: &View) -> Vec<u8> {
    let loading_display = if view.loading { "block" } else { "none" };
    let country_options = indent(
        &render_options_html(&view.country_options, &view.controls.country),
        10,
    );
    let industry_options = indent(
        &render_options_html(&view.industry_options, &view.controls.industry),
        10,
    );
    let sort_radios = [
        radio(
            "sort",
            SortField::Name.control_value(),
            "Name",
            view.controls.sort == SortField::Name,
        ),
        radio(
            "sort",
            SortField::EmployeeCount.control_value(),
            "Employees",
            view.controls.sort == SortField::EmployeeCount,
        ),
    ]
    .join("\n");
    let sort_radios = indent(&sort_radios, 8);
    let order_radios = [
        radio(
            "order",
            SortOrder::Ascending.control_value(),
            "Ascending",
            view.controls.order == SortOrder::Ascending,
        ),
        radio(
            "order",
            SortOrder::Descending.control_value(),
            "Descending",
            view.controls.order == SortOrder::Descending,
        ),
    ]
    .join("\n");
    let order_radios = indent(&order_radios, 8);
    let items = indent(render_items_html(&view.results).trim_end(), 8);
    let total = view.results.len();

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Company Finder</title>
  <script src="https://cdn.tailwindcss.com?plugins=forms"></script>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&amp;display=swap" rel="stylesheet"/>
  <style type="text/tailwindcss">
    body {{
      font-family: 'Inter', sans-serif;
    }}
  </style>
</head>
<body class="bg-slate-50 text-slate-900 min-h-screen">
  <main class="max-w-3xl mx-auto w-full px-8 py-10">
    <h1 class="text-4xl font-bold mb-8">Companies</h1>
    <div id="loading" style="display: {loading_display}" class="text-slate-500 mb-6">Loading&hellip;</div>
    <form class="grid gap-6 mb-8 md:grid-cols-2">
      <div>
        <label for="country" class="block text-sm font-semibold mb-1">Country</label>
        <select id="country" name="country" class="w-full rounded-lg">
{country_options}
        </select>
      </div>
      <div>
        <label for="industry" class="block text-sm font-semibold mb-1">Industry</label>
        <select id="industry" name="industry" class="w-full rounded-lg">
{industry_options}
        </select>
      </div>
      <fieldset>
        <legend class="text-sm font-semibold mb-1">Sort by</legend>
{sort_radios}
      </fieldset>
      <fieldset>
        <legend class="text-sm font-semibold mb-1">Order</legend>
{order_radios}
      </fieldset>
    </form>
    <p class="text-sm text-slate-500 mb-2">{total} results</p>
    <ul id="results" class="divide-y divide-slate-200">
{items}
    </ul>
  </main>
</body>
</html>
"####
    );
    html.into_bytes()
}
