// src/services/qr_service.rs

use image::Luma;
use qrcode::QrCode;

use crate::common::error::AppError;

// Gera o PNG do QR de reporte de incidentes de uma unidade.
// A URL codificada é `{appOrigin}?unitId={id}`: abri-la pré-seleciona
// a unidade e força o fluxo de SOLICITOR. O formato é contrato — os
// QRs já impressos nas portas dependem dele.
pub fn incident_report_png(app_origin: &str, unit_id: &str) -> Result<Vec<u8>, AppError> {
    let url = format!("{}?unitId={}", app_origin, unit_id);

    let code = QrCode::new(url.as_bytes())
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    let image_buffer = code.render::<Luma<u8>>().build();
    let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

    let mut buffer = Vec::new();
    dynamic_image
        .write_to(&mut buffer, image::ImageOutputFormat::Png)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gera_png_valido() {
        let png = incident_report_png("https://mantenimiento.example", "u1").unwrap();
        // Assinatura PNG.
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
