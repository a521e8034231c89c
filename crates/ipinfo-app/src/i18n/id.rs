//! Indonesian strings

use super::keys::{FieldLabels, HintTexts, PanelTexts, Texts};

pub const TEXTS: Texts = Texts {
    panel: PanelTexts {
        title: "Informasi IP",
        status_label: "Status Internet",
        connected: "Terhubung",
        disconnected: "Terputus",
        loading: "nteni sek...",
        checking: "Memeriksa koneksi...",
        no_data: "Tidak ada data tersedia, silakan periksa pengaturan.",
        rate_limited: "Anda telah melebihi batas 1000 permintaan per hari, Silakan ganti TOKEN ANDA.",
        upstream_error: "Layanan geolokasi mengirim respons yang tidak dapat dibaca.",
        config_error: "Kesalahan konfigurasi",
    },
    fields: FieldLabels {
        ip: "IP Publik",
        isp: "ISP",
        organization: "Organisasi",
        country_name_official: "Nama resmi negara",
        city: "Kota",
        country_name: "Negara",
        time_zone: "Zona Waktu",
        latitude: "Latitude",
        longitude: "Longitude",
    },
    hints: HintTexts {
        reload: "muat ulang",
        quit: "keluar",
        last_loaded: "Diperbarui",
    },
};
