use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// CSS styles.
pub async fn styles_css() -> Response {
    let css = r#"
:root {
    --bg: #f9fafb;
    --surface: #ffffff;
    --text: #111827;
    --text-muted: #6b7280;
    --accent: #4f46e5;
    --accent-hover: #4338ca;
    --success-bg: #dcfce7;
    --success-text: #166534;
    --error-bg: #fee2e2;
    --error-text: #b91c1c;
    --border: #e5e7eb;
    --shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    line-height: 1.6;
}

.centered {
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
    padding: 16px;
}

.page {
    max-width: 1200px;
    margin: 0 auto;
    padding: 32px 16px;
}

.card {
    background: var(--surface);
    border: 1px solid var(--border);
    border-radius: 12px;
    box-shadow: var(--shadow);
    padding: 24px;
}

.welcome-card {
    max-width: 640px;
    text-align: center;
}

.welcome-card h1 {
    color: var(--accent);
    margin-bottom: 12px;
}

.subtitle {
    color: var(--text-muted);
    margin-bottom: 24px;
}

.button-row {
    display: flex;
    gap: 12px;
    justify-content: center;
    flex-wrap: wrap;
}

.btn {
    display: inline-block;
    border: none;
    border-radius: 8px;
    padding: 10px 20px;
    font-size: 0.95rem;
    font-weight: 600;
    cursor: pointer;
    text-decoration: none;
    transition: background 0.2s;
}

.btn-primary {
    background: var(--accent);
    color: #fff;
}

.btn-primary:hover {
    background: var(--accent-hover);
}

.btn-primary:disabled {
    opacity: 0.6;
    cursor: not-allowed;
}

.btn-outline {
    background: var(--surface);
    color: var(--accent);
    border: 2px solid var(--accent);
}

.btn-ghost {
    background: rgba(255, 255, 255, 0.2);
    color: inherit;
}

.btn-sm {
    padding: 4px 10px;
    font-size: 0.8rem;
    border-radius: 6px;
    margin: 2px;
}

.topbar {
    background: linear-gradient(to right, #4f46e5, #7c3aed);
    color: #fff;
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 20px 32px;
}

.toolbar {
    margin-bottom: 20px;
}

.login-card {
    width: 100%;
    max-width: 380px;
    display: flex;
    flex-direction: column;
    gap: 8px;
}

.login-card h2 {
    text-align: center;
    margin-bottom: 8px;
}

label {
    font-size: 0.85rem;
    font-weight: 500;
    color: var(--text-muted);
}

input {
    width: 100%;
    padding: 8px 10px;
    border: 1px solid var(--border);
    border-radius: 8px;
    margin-bottom: 8px;
    font-size: 0.95rem;
}

.banner {
    border-radius: 8px;
    padding: 12px 16px;
    margin-bottom: 16px;
    background: var(--success-bg);
    color: var(--success-text);
}

.banner-error {
    background: var(--error-bg);
    color: var(--error-text);
}

.table-card {
    padding: 0;
    overflow-x: auto;
}

.process-table {
    width: 100%;
    border-collapse: collapse;
}

.process-table th {
    text-align: left;
    font-size: 0.75rem;
    text-transform: uppercase;
    letter-spacing: 0.05em;
    color: var(--text-muted);
    background: var(--bg);
    padding: 12px 16px;
}

.process-table td {
    padding: 12px 16px;
    border-top: 1px solid var(--border);
    font-size: 0.9rem;
    white-space: nowrap;
}

.empty-row td, .empty-state {
    text-align: center;
    color: var(--text-muted);
    padding: 40px 16px;
}

.status-pill {
    display: inline-block;
    padding: 2px 10px;
    border-radius: 999px;
    font-size: 0.8rem;
    font-weight: 600;
}

.status-online {
    background: var(--success-bg);
    color: var(--success-text);
}

.status-stopped {
    background: var(--error-bg);
    color: var(--error-text);
}

.detail-rows {
    display: grid;
    gap: 8px;
}

.detail-row {
    display: flex;
    justify-content: space-between;
    border-bottom: 1px solid var(--border);
    padding-bottom: 6px;
}

.detail-row .key {
    color: var(--text-muted);
}

.modal {
    position: fixed;
    inset: 0;
    background: rgba(0, 0, 0, 0.5);
    display: flex;
    align-items: center;
    justify-content: center;
    z-index: 50;
    padding: 16px;
}

.modal[hidden] {
    display: none;
}

.modal-content {
    background: var(--surface);
    border-radius: 12px;
    width: 100%;
    max-width: 480px;
    overflow: hidden;
}

.modal-header {
    background: var(--accent);
    color: #fff;
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 16px 24px;
}

.modal-close {
    background: none;
    border: none;
    color: #fff;
    font-size: 1.4rem;
    cursor: pointer;
}

.modal-body {
    padding: 24px;
}

.modal-footer {
    background: var(--bg);
    display: flex;
    justify-content: flex-end;
    gap: 8px;
    padding: 16px 24px;
}

.error-card {
    max-width: 480px;
    text-align: center;
}

.error-card h2 {
    color: var(--error-text);
    margin-bottom: 8px;
}

.error-card p {
    margin-bottom: 16px;
}
"#;

    (StatusCode::OK, [(header::CONTENT_TYPE, "text/css")], css).into_response()
}

/// Dashboard client script.
pub async fn main_js() -> Response {
    let js = r#"
(function() {
    'use strict';

    function esc(value) {
        const div = document.createElement('div');
        div.textContent = value == null ? '' : String(value);
        return div.innerHTML;
    }

    async function apiFetch(path, options) {
        const res = await fetch(path, Object.assign({ credentials: 'same-origin' }, options));
        return res;
    }

    function showBanner(id, message, isError) {
        const el = document.getElementById(id);
        if (!el) return;
        el.textContent = message;
        el.classList.toggle('banner-error', !!isError);
        el.hidden = false;
        if (!isError) {
            setTimeout(() => { el.hidden = true; }, 5000);
        }
    }

    /* ---------- Login page ---------- */

    const loginForm = document.getElementById('login-form');
    if (loginForm) {
        loginForm.addEventListener('submit', async (e) => {
            e.preventDefault();
            const submit = document.getElementById('login-submit');
            const errorBox = document.getElementById('login-error');
            errorBox.hidden = true;
            submit.disabled = true;
            submit.textContent = 'Logging in...';
            try {
                const res = await apiFetch('/api/auth/login', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({
                        email: document.getElementById('email').value,
                        password: document.getElementById('password').value,
                    }),
                });
                const data = await res.json().catch(() => ({}));
                if (res.ok && data.success) {
                    window.location.href = '/dashboard/home';
                    return;
                }
                errorBox.textContent = data.error || 'Something went wrong!';
                errorBox.hidden = false;
            } catch (err) {
                errorBox.textContent = 'Something went wrong!';
                errorBox.hidden = false;
            } finally {
                submit.disabled = false;
                submit.textContent = 'Login';
            }
        });
    }

    /* ---------- Process list page ---------- */

    const tbody = document.getElementById('process-tbody');
    let currentProcessName = null;

    function actionButtons(proc) {
        const online = proc.status === 'online';
        return [
            '<button class="btn btn-primary btn-sm" data-action="start" data-name="' + esc(proc.name) + '"' + (online ? ' disabled' : '') + '>Start</button>',
            '<button class="btn btn-outline btn-sm" data-action="stop" data-name="' + esc(proc.name) + '"' + (!online ? ' disabled' : '') + '>Stop</button>',
            '<button class="btn btn-outline btn-sm" data-action="restart" data-name="' + esc(proc.name) + '">Restart</button>',
            '<button class="btn btn-outline btn-sm" data-action="details" data-uuid="' + esc(proc.uuid || '') + '">Details</button>',
            '<button class="btn btn-outline btn-sm" data-action="update" data-name="' + esc(proc.name) + '">Update</button>',
            '<button class="btn btn-outline btn-sm" data-action="logs" data-name="' + esc(proc.name) + '">Logs</button>',
        ].join('');
    }

    function renderProcesses(processes) {
        if (!processes.length) {
            tbody.innerHTML = '<tr class="empty-row"><td colspan="8">No processes found</td></tr>';
            return;
        }
        tbody.innerHTML = processes.map((proc) => {
            const online = proc.status === 'online';
            const memory = ((proc.memory || 0) / 1024 / 1024).toFixed(2) + ' MB';
            const domain = proc.domain_name
                ? '<a href="http://' + esc(proc.domain_name) + '" target="_blank" rel="noopener noreferrer">' + esc(proc.domain_name) + '</a>'
                : '-';
            return '<tr>'
                + '<td>' + esc(proc.process_id) + '</td>'
                + '<td>' + esc(proc.name) + '</td>'
                + '<td>' + esc(proc.port || 'N/A') + '</td>'
                + '<td><span class="status-pill ' + (online ? 'status-online' : 'status-stopped') + '">' + (online ? 'Running' : 'Stopped') + '</span></td>'
                + '<td>' + memory + '</td>'
                + '<td>' + esc(proc.cpu) + '%</td>'
                + '<td>' + domain + '</td>'
                + '<td>' + actionButtons(proc) + '</td>'
                + '</tr>';
        }).join('');
    }

    async function listProcesses() {
        const refresh = document.getElementById('refresh-btn');
        refresh.disabled = true;
        refresh.textContent = 'Refreshing...';
        try {
            const res = await apiFetch('/api/dashboard/processes');
            if (!res.ok) {
                throw new Error('Failed to fetch processes: ' + res.status);
            }
            const data = await res.json();
            renderProcesses(data.data || []);
            showBanner('notification', 'Processes refreshed successfully', false);
        } catch (err) {
            showBanner('error', err.message || 'Failed to fetch processes', true);
        } finally {
            refresh.disabled = false;
            refresh.textContent = 'Refresh Processes';
        }
    }

    async function lifecycle(action, name) {
        if (action === 'stop' && !window.confirm('Are you sure you want to stop this process?')) {
            return;
        }
        try {
            const res = await apiFetch('/api/dashboard/process/' + action, {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ name: name }),
            });
            if (!res.ok) {
                throw new Error('Failed to ' + action + ' process: ' + res.status);
            }
            await listProcesses();
            showBanner('notification', 'Process ' + name + ' ' + action + 'ed successfully', false);
        } catch (err) {
            showBanner('error', err.message || 'Failed to ' + action + ' process', true);
        }
    }

    async function openMetadataModal(name) {
        currentProcessName = name;
        try {
            const res = await apiFetch('/api/dashboard/process/' + encodeURIComponent(name));
            let meta = { domain_name: '', public_ip: '', private_ip: '', type: '' };
            if (res.ok) {
                const body = await res.json();
                meta = Object.assign(meta, body.data || {});
            } else if (res.status !== 404) {
                throw new Error('Failed to fetch process metadata: ' + res.status);
            }
            document.getElementById('metadata-modal-title').textContent = 'Update Metadata for ' + name;
            document.getElementById('meta-domain').value = meta.domain_name || '';
            document.getElementById('meta-public-ip').value = meta.public_ip || '';
            document.getElementById('meta-private-ip').value = meta.private_ip || '';
            document.getElementById('meta-type').value = meta.type || '';
            document.getElementById('metadata-modal').hidden = false;
        } catch (err) {
            showBanner('error', err.message || 'Failed to fetch process metadata', true);
        }
    }

    async function updateMetadata() {
        try {
            const res = await apiFetch('/api/dashboard/process/' + encodeURIComponent(currentProcessName) + '/update-meta-data', {
                method: 'PUT',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({
                    name: currentProcessName,
                    domain_name: document.getElementById('meta-domain').value,
                    public_ip: document.getElementById('meta-public-ip').value,
                    private_ip: document.getElementById('meta-private-ip').value,
                    type: document.getElementById('meta-type').value,
                }),
            });
            if (!res.ok) {
                throw new Error('Failed to update metadata: ' + res.status);
            }
            document.getElementById('metadata-modal').hidden = true;
            showBanner('notification', 'Metadata updated successfully', false);
            await listProcesses();
        } catch (err) {
            showBanner('error', err.message || 'Failed to update metadata', true);
        }
    }

    async function logout() {
        try {
            const res = await apiFetch('/api/auth/logout');
            if (!res.ok) {
                throw new Error('Failed to logout: ' + res.status);
            }
            window.location.href = '/auth/login';
        } catch (err) {
            showBanner('error', err.message || 'Failed to logout', true);
        }
    }

    if (tbody) {
        document.getElementById('refresh-btn').addEventListener('click', listProcesses);
        document.getElementById('logout-btn').addEventListener('click', logout);
        document.getElementById('metadata-close').addEventListener('click', () => {
            document.getElementById('metadata-modal').hidden = true;
        });
        document.getElementById('metadata-cancel').addEventListener('click', () => {
            document.getElementById('metadata-modal').hidden = true;
        });
        document.getElementById('metadata-save').addEventListener('click', updateMetadata);

        tbody.addEventListener('click', (e) => {
            const btn = e.target.closest('button[data-action]');
            if (!btn || btn.disabled) return;
            const action = btn.dataset.action;
            if (action === 'details') {
                if (!btn.dataset.uuid) {
                    showBanner('error', 'No details found for this process', true);
                    return;
                }
                window.location.href = '/dashboard/details?uuid=' + encodeURIComponent(btn.dataset.uuid);
            } else if (action === 'update') {
                openMetadataModal(btn.dataset.name);
            } else if (action === 'logs') {
                window.location.href = '/logs?name=' + encodeURIComponent(btn.dataset.name);
            } else {
                lifecycle(action, btn.dataset.name);
            }
        });

        listProcesses();
    }

    /* ---------- Details page ---------- */

    const detailRows = document.getElementById('detail-rows');

    function renderDetail(data) {
        const online = data.status === 'online';
        const rows = [
            ['Name', esc(data.name)],
            ['Status', '<span class="status-pill ' + (online ? 'status-online' : 'status-stopped') + '">' + (online ? 'Running' : 'Stopped') + '</span>'],
            ['Type', esc(data.type || 'N/A')],
            ['Memory', ((data.memory || 0) / 1024 / 1024).toFixed(2) + ' MB'],
            ['CPU', esc(data.cpu) + '%'],
            ['Port', esc(data.port || 'N/A')],
            ['Domain', esc(data.domain_name || '-')],
            ['Public IP', esc(data.public_ip || '-')],
            ['Private IP', esc(data.private_ip || '-')],
        ];
        detailRows.innerHTML = rows.map(([key, value]) =>
            '<div class="detail-row"><span class="key">' + key + '</span><span>' + value + '</span></div>'
        ).join('');
    }

    async function loadDetails() {
        try {
            const res = await apiFetch('/api/dashboard/process-by-id/' + window.PROCESS_UUID);
            if (!res.ok) {
                throw new Error('Failed to fetch process details: ' + res.status);
            }
            const body = await res.json();
            renderDetail(body.data || {});
        } catch (err) {
            showBanner('error', err.message || 'Failed to fetch process details', true);
            detailRows.innerHTML = '<p class="empty-state">The requested process could not be found.</p>';
        }
    }

    if (detailRows && window.PROCESS_UUID) {
        document.getElementById('detail-refresh').addEventListener('click', loadDetails);
        loadDetails();
    }
})();
"#;

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript")],
        js,
    )
        .into_response()
}
