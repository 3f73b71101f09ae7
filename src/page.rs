/// Dashboard page: heading, heatmap and bar chart side by side, grade range
/// control underneath. Charts are drawn client-side from the JSON endpoints.
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{title}}</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { text-align: center; }
        .charts { display: flex; justify-content: center; }
        .chart { width: 48%; height: 450px; }
        .chart + .chart { margin-left: 4%; }
        .slider { width: 80%; margin: 20px auto 0; }
        .slider label { display: inline-block; width: 90px; font-weight: bold; }
        .slider input[type=range] { width: calc(100% - 160px); }
        .marks { display: flex; justify-content: space-between; margin-left: 90px; margin-right: 70px; color: #666; font-size: 12px; }
        .mode { text-align: center; margin-top: 10px; }
        .error { color: #721c24; text-align: center; }
    </style>
</head>
<body>
    <h1>{{title}}</h1>

    <div class="charts">
        <div id="heatmap-graph" class="chart"></div>
        <div id="bar-chart-graph" class="chart"></div>
    </div>

    <div class="slider">
        <div>
            <label for="grade-min">Min grade</label>
            <input type="range" id="grade-min" step="1">
            <span id="grade-min-value"></span>
        </div>
        <div>
            <label for="grade-max">Max grade</label>
            <input type="range" id="grade-max" step="1">
            <span id="grade-max-value"></span>
        </div>
        <div id="grade-marks" class="marks"></div>
    </div>

    <div class="mode">
        <label><input type="radio" name="mode" value="percent" checked> Percentage</label>
        <label><input type="radio" name="mode" value="count"> Count</label>
    </div>

    <p id="error" class="error"></p>

    <script>
        const minInput = document.getElementById('grade-min');
        const maxInput = document.getElementById('grade-max');

        function selectedMode() {
            return document.querySelector('input[name=mode]:checked').value;
        }

        async function fetchJson(url) {
            const response = await fetch(url);
            const data = await response.json();
            if (!response.ok) {
                throw new Error(data.error || response.statusText);
            }
            return data;
        }

        async function updateHeatmap(min, max) {
            const data = await fetchJson(`/api/heatmap?min=${min}&max=${max}`);
            Plotly.react('heatmap-graph', [{
                type: 'heatmap',
                x: data.study_times,
                y: data.grades,
                z: data.counts,
                colorscale: 'Viridis'
            }], {
                title: data.title,
                xaxis: { title: data.x_label, dtick: 1 },
                yaxis: { title: data.y_label }
            });
        }

        async function updateBarChart(min, max) {
            const data = await fetchJson(`/api/support?min=${min}&max=${max}&mode=${selectedMode()}`);
            Plotly.react('bar-chart-graph', [{
                type: 'bar',
                x: data.bars.map(bar => bar.label),
                y: data.bars.map(bar => bar.value)
            }], {
                title: data.title,
                xaxis: { title: data.x_label },
                yaxis: { title: data.y_label }
            });
        }

        async function refresh() {
            let min = Number(minInput.value);
            let max = Number(maxInput.value);
            if (min > max) {
                [min, max] = [max, min];
            }
            document.getElementById('grade-min-value').textContent = min;
            document.getElementById('grade-max-value').textContent = max;
            try {
                await Promise.all([updateHeatmap(min, max), updateBarChart(min, max)]);
                document.getElementById('error').textContent = '';
            } catch (error) {
                document.getElementById('error').textContent = `Error: ${error.message}`;
            }
        }

        async function init() {
            const bounds = await fetchJson('/api/bounds');
            for (const input of [minInput, maxInput]) {
                input.min = bounds.min;
                input.max = bounds.max;
                input.addEventListener('input', refresh);
            }
            minInput.value = bounds.min;
            maxInput.value = bounds.max;
            document.getElementById('grade-marks').innerHTML =
                bounds.marks.map(mark => `<span>${mark}</span>`).join('');
            document.querySelectorAll('input[name=mode]')
                .forEach(radio => radio.addEventListener('change', refresh));
            await refresh();
        }

        init().catch(error => {
            document.getElementById('error').textContent = `Error: ${error.message}`;
        });
    </script>
</body>
</html>
"#;

pub fn render(title: &str) -> String {
    DASHBOARD_HTML.replace("{{title}}", &escape_html(title))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
