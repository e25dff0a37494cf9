//! # Storefront Page
//!
//! Server-rendered catalog plus a small inline script that keeps the cart
//! in the browser, posts the checkout form to `/api/checkout` and redirects
//! to the payment URL it gets back.
//!
//! The inline cart mirrors `shop_core::Cart` (and `shop-wasm`'s `WasmCart`):
//! append-only items, ids from a per-page counter starting at 1, checkout
//! enabled only when non-empty. Keep the two in step when either changes.

use shop_core::{Product, ProductCatalog};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn product_card(product: &Product) -> String {
    format!(
        r#"
        <div class="card">
            <h2>{name}</h2>
            <p class="desc">{description}</p>
            <div class="row">
                <span class="price">{price}</span>
                <button type="button" onclick="addToCart({id})">Agregar al carrito</button>
            </div>
        </div>"#,
        name = escape_html(&product.name),
        description = escape_html(&product.description),
        price = escape_html(&product.display_price()),
        id = product.id,
    )
}

/// Render the storefront for `catalog`
pub fn render(catalog: &ProductCatalog) -> String {
    let cards: String = catalog.iter().map(product_card).collect();

    // Keep `</script>` in product text from closing the script block
    let products_json = serde_json::to_string(&catalog.products)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>Tienda PagoPar</title>
<style>
    body {{ font-family: system-ui; margin: 0; padding: 32px; background: #f7f7f8; }}
    main {{ max-width: 960px; margin: 0 auto; }}
    .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 24px; }}
    .card {{ background: white; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }}
    .desc {{ color: #666; }}
    .row {{ display: flex; justify-content: space-between; align-items: center; }}
    .price {{ font-weight: bold; }}
    button {{ padding: 8px 16px; border: 0; border-radius: 4px; background: #2563eb; color: white; cursor: pointer; }}
    button:disabled {{ background: #9ca3af; cursor: default; }}
    form label {{ display: block; margin-top: 12px; }}
    form input {{ width: 100%; padding: 6px; }}
    .hidden {{ display: none; }}
    .error {{ color: #b91c1c; }}
</style>
</head>
<body>
<main>
    <h1>Tienda PagoPar</h1>

    <section id="catalog">
        <p><button type="button" id="go-checkout" onclick="showCheckout(true)" disabled>Ir al Checkout (0 items)</button></p>
        <div class="grid">{cards}
        </div>
    </section>

    <section id="checkout" class="hidden">
        <h2>Checkout</h2>
        <h3>Resumen del Carrito</h3>
        <div id="summary"></div>
        <p><strong>Total: <span id="total"></span></strong></p>
        <form id="checkout-form">
            <label>Nombre <input type="text" name="nombre" required></label>
            <label>Email <input type="email" name="email" required></label>
            <label>Teléfono <input type="tel" name="telefono" required></label>
            <label>Documento <input type="text" name="documento" required></label>
            <p id="checkout-error" class="error"></p>
            <p>
                <button type="button" onclick="showCheckout(false)">Volver</button>
                <button type="submit">Pagar con PagoPar</button>
            </p>
        </form>
    </section>
</main>
<script>
    const products = {products_json};
    const cart = [];
    let nextCartId = 0;
    const money = new Intl.NumberFormat('es-PY', {{ style: 'currency', currency: 'PYG' }});

    function addToCart(id) {{
        const product = products.find((p) => p.id === id);
        if (!product) return;
        nextCartId += 1;
        cart.push({{ ...product, cartId: nextCartId }});
        render();
    }}

    function total() {{
        return cart.reduce((sum, item) => sum + item.price, 0);
    }}

    function render() {{
        const button = document.getElementById('go-checkout');
        button.disabled = cart.length === 0;
        button.textContent = 'Ir al Checkout (' + cart.length + ' items)';

        const summary = document.getElementById('summary');
        summary.replaceChildren(...cart.map((item) => {{
            const row = document.createElement('div');
            row.className = 'row';
            const name = document.createElement('span');
            name.textContent = item.name;
            const price = document.createElement('span');
            price.textContent = money.format(item.price);
            row.append(name, price);
            return row;
        }}));
        document.getElementById('total').textContent = money.format(total());
    }}

    function showCheckout(show) {{
        document.getElementById('catalog').classList.toggle('hidden', show);
        document.getElementById('checkout').classList.toggle('hidden', !show);
    }}

    document.getElementById('checkout-form').addEventListener('submit', async (event) => {{
        event.preventDefault();
        const form = new FormData(event.target);
        const errorBox = document.getElementById('checkout-error');
        errorBox.textContent = '';
        try {{
            const response = await fetch('/api/checkout', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify({{
                    ...Object.fromEntries(form.entries()),
                    items: cart,
                    monto_total: total(),
                }}),
            }});
            const data = await response.json();
            if (data.url) {{
                window.location.href = data.url;
            }} else {{
                errorBox.textContent = data.error || 'Error en el checkout';
            }}
        }} catch (err) {{
            errorBox.textContent = String(err);
        }}
    }});

    render();
</script>
</body>
</html>
"#,
        cards = cards,
        products_json = products_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Té" & 'mate'</b>"#),
            "&lt;b&gt;&quot;Té&quot; &amp; &#39;mate&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_lists_catalog() {
        let page = render(&ProductCatalog::demo());

        assert!(page.contains("Producto 1"));
        assert!(page.contains("Gs. 150.000"));
        assert!(page.contains("addToCart(3)"));
        assert!(page.contains("/api/checkout"));
    }

    #[test]
    fn test_inline_cart_uses_counter_ids() {
        let page = render(&ProductCatalog::demo());

        assert!(page.contains("let nextCartId = 0;"));
        assert!(page.contains("nextCartId += 1;"));
        assert!(page.contains("cartId: nextCartId"));
        assert!(page.contains("button.disabled = cart.length === 0;"));
    }

    #[test]
    fn test_render_escapes_product_text() {
        let mut catalog = ProductCatalog::new();
        catalog.add(Product::new(9, "</script><script>alert(1)</script>", 1_000));

        let page = render(&catalog);
        assert!(!page.contains("</script><script>alert(1)"));
        assert!(page.contains("&lt;/script&gt;"));
    }
}
