//! HTML report generation with D3.js bar charts

use crate::analyzer::AnalysisReport;
use crate::error::Result;
use crate::report::{ReportView, Summary};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ReportData<'a> {
    summary: &'a Summary,
    files: Vec<ReportView<'a>>,
}

pub fn write<W: Write>(writer: &mut W, reports: &[AnalysisReport]) -> Result<()> {
    let summary = Summary::from_reports(reports);
    let json_data = build_json_data(&summary, reports)?;

    write!(writer, r#"<!DOCTYPE html>
<html lang="th">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ตรวจสอบลิขสิทธิ์เพลง - Report</title>
    <script src="https://d3js.org/d3.v7.min.js"></script>
    <style>
        :root {{
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --info: #58a6ff;
            --caution: #d29922;
            --high: #f85149;
            --accent: #a371f7;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans Thai', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 2rem; }}
        .header {{
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 1px solid var(--border);
        }}
        .logo {{ font-size: 2rem; font-weight: 800; }}
        .subtitle {{ color: var(--dim); }}
        .stats {{
            display: grid;
            grid-template-columns: repeat(4, 1fr);
            gap: 1rem;
            margin-bottom: 2rem;
        }}
        .stat {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.25rem;
            text-align: center;
        }}
        .stat-value {{ font-size: 2.5rem; font-weight: 700; line-height: 1; }}
        .stat-label {{ color: var(--dim); font-size: 0.8rem; text-transform: uppercase; margin-top: 0.5rem; }}
        .stat.high .stat-value {{ color: var(--high); }}
        .stat.caution .stat-value {{ color: var(--caution); }}
        .stat.info .stat-value {{ color: var(--info); }}
        .file-card {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
        }}
        .file-name {{ font-family: 'SF Mono', 'Fira Code', monospace; color: var(--accent); font-size: 1.1rem; }}
        .file-meta {{ color: var(--dim); font-size: 0.85rem; margin-bottom: 1rem; }}
        .file-grid {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }}
        .chart-title {{ font-weight: 600; color: var(--dim); margin-bottom: 0.5rem; }}
        details {{
            border: 1px solid var(--border);
            border-radius: 8px;
            padding: 0.75rem 1rem;
            margin-bottom: 0.75rem;
        }}
        summary {{ cursor: pointer; font-weight: 600; }}
        .cols {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin-top: 0.75rem; }}
        .banner {{ border-radius: 6px; padding: 0.5rem 0.75rem; font-size: 0.9rem; }}
        .banner.high {{ background: rgba(248,81,73,0.15); color: var(--high); }}
        .banner.caution {{ background: rgba(210,153,34,0.15); color: var(--caution); }}
        .banner.info {{ background: rgba(88,166,255,0.15); color: var(--info); }}
        .bar {{ fill: var(--accent); }}
        .footer {{
            margin-top: 2rem;
            padding-top: 1rem;
            border-top: 1px solid var(--border);
            color: var(--dim);
            font-size: 0.85rem;
            text-align: center;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">🎵 ระบบตรวจสอบลิขสิทธิ์เพลง</div>
            <div class="subtitle">Mock similarity report. Scores are randomly generated, not measured.</div>
        </div>

        <div class="stats">
            <div class="stat">
                <div class="stat-value">{total_files}</div>
                <div class="stat-label">Files</div>
            </div>
            <div class="stat high">
                <div class="stat-value">{high}</div>
                <div class="stat-label">High risk</div>
            </div>
            <div class="stat caution">
                <div class="stat-value">{caution}</div>
                <div class="stat-label">Caution</div>
            </div>
            <div class="stat info">
                <div class="stat-value">{info}</div>
                <div class="stat-label">Info</div>
            </div>
        </div>

        <div id="files"></div>

        <div class="footer">Generated by copycheck</div>
    </div>

    <script>
    const data = {json_data};

    function esc(s) {{
        return String(s).replace(/[&<>"']/g, c => ({{'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}})[c]);
    }}

    function drawChart(el, bars) {{
        const margin = {{ top: 10, right: 10, bottom: 40, left: 40 }};
        const width = 420 - margin.left - margin.right;
        const height = 240 - margin.top - margin.bottom;

        const svg = d3.select(el)
            .append('svg')
            .attr('width', width + margin.left + margin.right)
            .attr('height', height + margin.top + margin.bottom)
            .append('g')
            .attr('transform', `translate(${{margin.left}},${{margin.top}})`);

        const x = d3.scaleBand().domain(bars.map(d => d.label)).range([0, width]).padding(0.3);
        const y = d3.scaleLinear().domain([0, 100]).range([height, 0]);

        svg.selectAll('.bar')
            .data(bars)
            .enter()
            .append('rect')
            .attr('class', 'bar')
            .attr('x', d => x(d.label))
            .attr('width', x.bandwidth())
            .attr('y', d => y(d.value))
            .attr('height', d => height - y(d.value))
            .attr('rx', 3)
            .append('title')
            .text(d => `${{d.label}}: ${{d.value.toFixed(2)}}%`);

        svg.append('g')
            .attr('transform', `translate(0,${{height}})`)
            .call(d3.axisBottom(x))
            .style('color', '#7d8590');

        svg.append('g')
            .call(d3.axisLeft(y).ticks(5).tickFormat(d => d + '%'))
            .style('color', '#7d8590');
    }}

    function renderFile(file, idx) {{
        const meta = [file.format.toUpperCase(), `${{file.size_bytes}} bytes`];
        if (file.audio && file.audio.duration_secs) meta.push(`${{file.audio.duration_secs.toFixed(1)}}s`);
        if (file.audio && file.audio.sample_rate) meta.push(`${{file.audio.sample_rate}} Hz`);

        const panels = file.candidates.map((c, i) => `
            <details>
                <summary>🎵 ${{esc(c.title)}} - ${{esc(c.artist)}} (${{c.similarity_percent}}% คล้ายคลึง)</summary>
                <div class="cols">
                    <div>
                        <div><b>ประเภท:</b> ${{esc(c.genre_tag)}}</div>
                        <div><b>เจ้าของลิขสิทธิ์:</b> ${{esc(c.copyright_owner)}}</div>
                    </div>
                    <div class="banner ${{c.risk}}">${{esc(file.banners[i])}}</div>
                </div>
            </details>`).join('');

        const card = document.createElement('div');
        card.className = 'file-card';
        card.innerHTML = `
            <div class="file-name">${{esc(file.file_name)}}</div>
            <div class="file-meta">${{meta.join(' · ')}} · ${{esc(file.generated)}}</div>
            <div class="file-grid">
                <div>
                    <div class="chart-title">📊 ผลการวิเคราะห์</div>
                    <div id="chart-${{idx}}"></div>
                </div>
                <div>
                    <div class="chart-title">🎵 เพลงที่มีความคล้ายคลึง</div>
                    ${{panels}}
                </div>
            </div>`;
        document.getElementById('files').appendChild(card);
        drawChart(`#chart-${{idx}}`, file.chart);
    }}

    data.files.forEach(renderFile);
    </script>
</body>
</html>
"#,
        total_files = summary.total_files,
        high = summary.high,
        caution = summary.caution,
        info = summary.info,
        json_data = json_data
    )?;

    Ok(())
}

fn build_json_data(summary: &Summary, reports: &[AnalysisReport]) -> Result<String> {
    let files = reports.iter().map(ReportView::new).collect();
    let json = serde_json::to_string(&ReportData { summary, files })?;
    // Keep a file name like "</script>" from closing the script block
    Ok(json.replace("</", "<\\/"))
}
