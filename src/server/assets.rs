/// Embedded browser front-end. Cytoscape does the drawing, layout and
/// hit-testing; every tap and file goes to the session, and the commands it
/// answers with are replayed on the graph.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Scope Viewer</title>
    <script src="https://unpkg.com/cytoscape@3.30.2/dist/cytoscape.min.js"></script>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            color: #333;
            overflow: hidden;
        }
        #container { display: flex; height: 100vh; }
        #main { flex: 1; display: flex; flex-direction: column; }
        #toolbar {
            display: flex; gap: 16px; align-items: center;
            padding: 8px 12px; border-bottom: 1px solid #ddd; background: #fafafa;
        }
        #title { font-weight: bold; color: #235789; min-width: 120px; }
        #error { color: #B22222; }
        #cy { flex: 1; }
        #info {
            width: 340px; padding: 16px; overflow-y: auto;
            border-left: 1px solid #ddd; font-size: 0.9em;
        }
        .info-title { font-size: 1.3em; color: #235789; margin: 12px 0 8px; }
        .info-subtitle { font-weight: bold; color: #575757; margin-top: 10px; }
        .info-name { font-weight: bold; word-break: break-all; }
        .raw-text { word-break: break-all; }
        .two-cols { display: flex; gap: 24px; }
        .img-box { margin: 8px 0; text-align: center; }
        .img-box img { max-width: 100%; max-height: 220px; }
        .symbol-compound.source { color: #B22222; }
        .symbol-compound.intermediate { color: #235789; }
        .symbol-compound.sink { color: #68956D; }
        .load-data { margin: 4px 0; }
        .spacer { height: 8px; }
    </style>
</head>
<body>
<div id="container">
    <div id="main">
        <div id="toolbar">
            <span id="title">No scope loaded</span>
            <label>Scope file <input type="file" id="scopeFile" accept=".json"></label>
            <label>Depictions <input type="file" id="svgFiles" accept=".svg" multiple></label>
            <label><input type="checkbox" id="disableAnimation"> Disable animation</label>
            <span id="error"></span>
        </div>
        <div id="cy"></div>
    </div>
    <div id="info"></div>
</div>
<script>
    const cy = cytoscape({
        container: document.getElementById('cy'),
        motionBlur: true,
        style: [
            { selector: 'node[type = "reaction"]', style: {
                'content': 'data(label)', 'text-valign': 'center', 'text-halign': 'center',
                'color': '#575757', 'border-color': '#BFBFBF', 'border-width': 4,
                'background-color': 'white', 'shape': 'ellipse', 'width': 120, 'height': 100 } },
            { selector: 'node[type = "compound"]', style: {
                'content': 'data(label)', 'text-valign': 'bottom', 'text-halign': 'center',
                'font-weight': 'bold', 'text-margin-y': 8,
                'text-background-color': 'white', 'text-background-opacity': 0.85,
                'text-background-shape': 'roundrectangle',
                'shape': 'roundrectangle', 'width': 100, 'height': 100, 'border-width': 6 } },
            { selector: 'node[inSink = 0]', style: { 'background-color': '#235789', 'border-color': '#235789' } },
            { selector: 'node[inSink = 1]', style: { 'background-color': '#68956D', 'border-color': '#68956D' } },
            { selector: 'node[isSource = 1]', style: { 'background-color': '#B22222', 'border-color': '#B22222' } },
            { selector: 'node[img]', style: {
                'background-image': 'data(img)', 'background-fit': 'contain', 'background-width': '90%', 'background-height': '90%' } },
            { selector: 'edge', style: {
                'width': 2, 'line-color': '#BFBFBF', 'curve-style': 'bezier',
                'source-arrow-color': '#BFBFBF', 'source-arrow-shape': 'triangle' } },
            { selector: '.faded', style: { 'opacity': 0.15, 'text-opacity': 0.25 } },
        ],
    });

    let generation = 0;

    function byIds(ids) {
        return cy.collection(ids.map(id => cy.getElementById(id)));
    }

    function apply(update) {
        generation = update.generation;
        for (const cmd of update.commands) {
            switch (cmd.command) {
                case 'show_graph':
                    cy.elements().remove();
                    cy.add(cmd.elements);
                    break;
                case 'set_title':
                    document.getElementById('title').textContent = cmd.title;
                    break;
                case 'set_image':
                    cy.getElementById(cmd.id).data('img', cmd.uri);
                    break;
                case 'set_faded':
                    cy.elements().removeClass('faded');
                    byIds(cmd.elements).addClass('faded');
                    break;
                case 'clear_faded':
                    cy.elements().removeClass('faded');
                    break;
                case 'fit_and_center': {
                    const eles = byIds(cmd.elements);
                    cy.animate({ fit: { eles }, center: { eles } }, { duration: cmd.duration_ms });
                    break;
                }
                case 'set_min_zoom':
                    cy.minZoom(cmd.zoom);
                    break;
                case 'run_layout': {
                    const options = Object.assign({}, cmd, { roots: byIds(cmd.roots) });
                    delete options.command;
                    const layout = cy.layout(options);
                    layout.one('layoutstop', () => post('/api/layout-complete', { zoom: cy.zoom() }));
                    layout.run();
                    break;
                }
            }
        }
        document.getElementById('info').innerHTML = update.panel;
    }

    async function send(url, options) {
        const response = await fetch(url, options);
        const body = await response.json();
        if (!response.ok) {
            document.getElementById('error').textContent = body.error;
            return null;
        }
        document.getElementById('error').textContent = '';
        apply(body);
        return body;
    }

    function post(url, json) {
        return send(url, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(json === undefined ? {} : json),
        });
    }

    function postAssets() {
        for (const file of document.getElementById('svgFiles').files) {
            // Ticket taken when the read starts, not when it ends
            const issued = generation;
            file.arrayBuffer().then(content => send(
                `/api/assets?name=${encodeURIComponent(file.name)}&generation=${issued}`,
                { method: 'POST', body: content }));
        }
    }

    async function postScope() {
        const file = document.getElementById('scopeFile').files[0];
        if (!file) return;
        const text = await file.text();
        const update = await send(`/api/scope?name=${encodeURIComponent(file.name)}`,
            { method: 'POST', body: text });
        if (update) postAssets();
    }

    cy.on('tap', 'node', e => post(`/api/tap/node/${encodeURIComponent(e.target.id())}`));
    cy.on('tap', e => { if (e.target === cy) post('/api/tap/background'); });

    document.getElementById('scopeFile').addEventListener('change', postScope);
    document.getElementById('svgFiles').addEventListener('change', postAssets);
    document.getElementById('disableAnimation').addEventListener('change', e =>
        post('/api/animation', { enabled: !e.target.checked }));

    fetch('/api/sync').then(r => r.json()).then(apply);
    setInterval(() => fetch('/api/updates').then(r => r.json()).then(body => {
        if (body.commands.length) apply(body);
    }), 1000);
</script>
</body>
</html>
"##;
